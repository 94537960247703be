/// One fixture sample: seconds after `BASE_EPOCH`, millisecond part, value, status text.
pub type FixtureSample = (i64, u16, f64, &'static str);

pub struct FixturePoint {
    pub id: &'static str,
    pub description: &'static str,
    /// Whether `describe` answers; otherwise the description is only in the listing.
    pub describable: bool,
    pub units: &'static str,
    pub samples: &'static [FixtureSample],
}

/// Percent load, five raw samples.
pub const ADE1CA02: &str = "MDSSCSC1.ANVCALC.ADE1CA02";
/// Max exhaust gas temperature, four raw samples.
pub const ADE1CA03: &str = "MDSSCSC1.ANVCALC.ADE1CA03";
/// Exhaust flow; described only through the point listing.
pub const ADE1CA04: &str = "MDSSCSC1.ANVCALC.ADE1CA04";
/// Spare point with no history in the fixture window.
pub const ADE1CA09: &str = "MDSSCSC1.ANVCALC.ADE1CA09";
/// Redundant load sensor sharing ADE1CA02's description.
pub const ADE1CA12: &str = "MDSSCSC1.ANVCALC.ADE1CA12";
/// A point that exists nowhere.
pub const MISSING: &str = "GIBBERISH.DOESNOT1.EXIST123";

pub const POINTS: &[FixturePoint] = &[
    FixturePoint {
        id: ADE1CA02,
        description: "ADE1 Percent Load",
        describable: true,
        units: "Load",
        samples: &[
            (5, 0, 74.3, "OK"),
            (10, 250, 71.3, "OK"),
            (15, 0, 70.7, "OK"),
            (20, 500, 72.2, "OK"),
            (25, 0, 72.2, "OK"),
        ],
    },
    FixturePoint {
        id: ADE1CA03,
        description: "ADE1 Max EGT",
        describable: true,
        units: "DegF",
        samples: &[
            (5, 0, 420.0, "OK"),
            (15, 0, 419.0, "OK"),
            (20, 0, 413.0, "HIGH WARN"),
            (25, 0, 415.0, "OK"),
        ],
    },
    FixturePoint {
        id: ADE1CA04,
        description: "ADE1 Exhaust Flow",
        describable: false,
        units: "kg/s",
        samples: &[(10, 0, 3.5, "OK"), (20, 0, 3.6, "OK")],
    },
    FixturePoint {
        id: ADE1CA09,
        description: "ADE1 Spare",
        describable: true,
        units: "",
        samples: &[],
    },
    FixturePoint {
        id: ADE1CA12,
        description: "ADE1 Percent Load",
        describable: true,
        units: "Load",
        samples: &[(5, 0, 74.1, "OK"), (15, 0, 70.9, "MANUAL")],
    },
];

pub fn by_id(id: &str) -> Option<&'static FixturePoint> {
    POINTS.iter().find(|p| p.id == id)
}
