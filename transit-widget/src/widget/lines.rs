//! Known lines and their stations, for picking valid station names.

use serde::Serialize;

/// One line with its stations in running order from Union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: &'static str,
    pub stations: &'static [&'static str],
}

const LINES: &[Line] = &[
    Line {
        id: "STOUFFVILLE_LINE",
        stations: &[
            "Union Station GO",
            "Kennedy GO",
            "Agincourt GO",
            "Miliken GO",
            "Unionville GO",
            "Centennial GO",
            "Markham GO",
            "Mount Joy GO",
            "Stouffville GO",
            "Old Elm GO",
        ],
    },
    Line {
        id: "RICHMOND_HILL_LINE",
        stations: &[
            "Union Station GO",
            "Oriole GO",
            "Old Cummer GO",
            "Langstaff GO",
            "Richmond Hill GO",
            "Gormley GO",
            "Bloomington GO",
        ],
    },
    Line {
        id: "BARRIE_LINE",
        stations: &[
            "Union Station GO",
            "Downsview Park GO",
            "Rutherford GO",
            "Maple GO",
            "King City GO",
            "Aurora GO",
            "Newmarket GO",
            "East Gwillimbury GO",
            "Bradford GO",
            "Barrie South GO",
            "Allandale Waterfront GO",
        ],
    },
    Line {
        id: "KITCHENER_LINE",
        stations: &[
            "Union Station GO",
            "Bloor GO",
            "Weston GO",
            "Etobicoke North GO",
            "Malton GO",
            "Bramalea GO",
            "Brampton Innovation GO",
            "Mount Pleasant GO",
            "Georgetown GO",
            "Acton GO",
            "Guelph Central GO",
            "Kitchener GO",
        ],
    },
    Line {
        id: "LAKESHORE_EAST_LINE",
        stations: &[
            "Union Station GO",
            "Danforth GO",
            "Scarborough GO",
            "Eglinton GO",
            "Guildwood GO",
            "Rouge Hill GO",
            "Pickering GO",
            "Ajax GO",
            "Whitby GO",
            "Oshawa GO",
        ],
    },
    Line {
        id: "LAKESHORE_WEST_LINE",
        stations: &[
            "Union Station GO",
            "Exhibition GO",
            "Mimico GO",
            "Long Branch GO",
            "Port Credit GO",
            "Clarkson GO",
            "Oakville GO",
            "Bronte GO",
            "Appleby GO",
            "Burlington GO",
            "West Harbour GO",
            "Hamilton GO",
            "St Catharines GO",
            "Niagara Falls GO",
        ],
    },
    Line {
        id: "MILTON_LINE",
        stations: &[
            "Union Station GO",
            "Kipling GO",
            "Dixie GO",
            "Cooksville GO",
            "Erindale GO",
            "Streetsville GO",
            "Meadowvale GO",
            "Lisgar GO",
            "Milton GO",
        ],
    },
    Line {
        id: "UP_EXPRESS",
        stations: &[
            "Union Station GO",
            "Bloor GO",
            "Weston GO",
            "Pearson Airport GO",
        ],
    },
];

/// All lines.
pub fn catalogue() -> &'static [Line] {
    LINES
}

/// Look up a line by id.
pub fn find(id: &str) -> Option<&'static Line> {
    LINES.iter().find(|line| line.id == id)
}

/// Whether any line serves a station with this name.
pub fn is_known_station(name: &str) -> bool {
    LINES
        .iter()
        .any(|line| line.stations.iter().any(|s| s.eq_ignore_ascii_case(name.trim())))
}
