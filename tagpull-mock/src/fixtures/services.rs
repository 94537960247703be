pub struct FixtureService {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub status: &'static str,
}

pub const SERVICES: &[FixtureService] = &[
    FixtureService {
        name: "MDSSCSC1.ANVCALC",
        description: "Calculation Service",
        kind: "SSERVER",
        status: "Running",
    },
    FixtureService {
        name: "MDSSCSC1.ANVHIST",
        description: "History Service",
        kind: "HSERVER",
        status: "Running",
    },
];
