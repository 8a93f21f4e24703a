//! J2000 mean Keplerian elements with centennial rates for the major planets.
//!
//! Values are the standard JPL approximate-ephemeris table (valid roughly
//! 1800-2050, with Pluto treated the same way at reduced accuracy).
//! Semi-major axes in AU, angles in degrees, rates per Julian century.

use atlas_core::Body;

/// Mean orbital elements at J2000 plus linear centennial rates.
#[derive(Debug, Clone, Copy)]
pub struct MeanElements {
    pub semi_major_axis_au: f64,
    pub semi_major_axis_rate: f64,
    pub eccentricity: f64,
    pub eccentricity_rate: f64,
    pub inclination_deg: f64,
    pub inclination_rate: f64,
    pub mean_longitude_deg: f64,
    pub mean_longitude_rate: f64,
    pub longitude_perihelion_deg: f64,
    pub longitude_perihelion_rate: f64,
    pub ascending_node_deg: f64,
    pub ascending_node_rate: f64,
}

impl MeanElements {
    /// Elements evaluated `centuries` Julian centuries after J2000.
    pub fn at(&self, centuries: f64) -> PropagatedElements {
        PropagatedElements {
            semi_major_axis_au: self.semi_major_axis_au + self.semi_major_axis_rate * centuries,
            eccentricity: self.eccentricity + self.eccentricity_rate * centuries,
            inclination_deg: self.inclination_deg + self.inclination_rate * centuries,
            mean_longitude_deg: self.mean_longitude_deg + self.mean_longitude_rate * centuries,
            longitude_perihelion_deg: self.longitude_perihelion_deg
                + self.longitude_perihelion_rate * centuries,
            ascending_node_deg: self.ascending_node_deg + self.ascending_node_rate * centuries,
        }
    }
}

/// Elements propagated to a specific epoch.
#[derive(Debug, Clone, Copy)]
pub struct PropagatedElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_longitude_deg: f64,
    pub longitude_perihelion_deg: f64,
    pub ascending_node_deg: f64,
}

/// Mean elements for a catalog planet; `None` for the Sun and 3I/ATLAS.
pub fn mean_elements(body: Body) -> Option<&'static MeanElements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Earth => Some(&EARTH),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        Body::Sun | Body::Atlas => None,
    }
}

const MERCURY: MeanElements = MeanElements {
    semi_major_axis_au: 0.387_099_27,
    semi_major_axis_rate: 0.000_000_37,
    eccentricity: 0.205_635_93,
    eccentricity_rate: 0.000_019_06,
    inclination_deg: 7.004_979_02,
    inclination_rate: -0.005_947_49,
    mean_longitude_deg: 252.250_323_50,
    mean_longitude_rate: 149_472.674_111_75,
    longitude_perihelion_deg: 77.457_796_28,
    longitude_perihelion_rate: 0.160_476_89,
    ascending_node_deg: 48.330_765_93,
    ascending_node_rate: -0.125_340_81,
};

const VENUS: MeanElements = MeanElements {
    semi_major_axis_au: 0.723_335_66,
    semi_major_axis_rate: 0.000_003_90,
    eccentricity: 0.006_776_72,
    eccentricity_rate: -0.000_041_07,
    inclination_deg: 3.394_676_05,
    inclination_rate: -0.000_788_90,
    mean_longitude_deg: 181.979_099_50,
    mean_longitude_rate: 58_517.815_387_29,
    longitude_perihelion_deg: 131.602_467_18,
    longitude_perihelion_rate: 0.002_683_29,
    ascending_node_deg: 76.679_842_55,
    ascending_node_rate: -0.277_694_18,
};

// Earth-Moon barycenter; close enough for this engine's catalog contract.
const EARTH: MeanElements = MeanElements {
    semi_major_axis_au: 1.000_002_61,
    semi_major_axis_rate: 0.000_005_62,
    eccentricity: 0.016_711_23,
    eccentricity_rate: -0.000_043_92,
    inclination_deg: -0.000_015_31,
    inclination_rate: -0.012_946_68,
    mean_longitude_deg: 100.464_571_66,
    mean_longitude_rate: 35_999.372_449_81,
    longitude_perihelion_deg: 102.937_681_93,
    longitude_perihelion_rate: 0.323_273_64,
    ascending_node_deg: 0.0,
    ascending_node_rate: 0.0,
};

const MARS: MeanElements = MeanElements {
    semi_major_axis_au: 1.523_710_34,
    semi_major_axis_rate: 0.000_018_47,
    eccentricity: 0.093_394_10,
    eccentricity_rate: 0.000_078_82,
    inclination_deg: 1.849_691_42,
    inclination_rate: -0.008_131_31,
    mean_longitude_deg: -4.553_432_05,
    mean_longitude_rate: 19_140.302_684_99,
    longitude_perihelion_deg: -23.943_629_59,
    longitude_perihelion_rate: 0.444_410_88,
    ascending_node_deg: 49.559_538_91,
    ascending_node_rate: -0.292_573_43,
};

const JUPITER: MeanElements = MeanElements {
    semi_major_axis_au: 5.202_887_00,
    semi_major_axis_rate: -0.000_116_07,
    eccentricity: 0.048_386_24,
    eccentricity_rate: -0.000_132_53,
    inclination_deg: 1.304_396_95,
    inclination_rate: -0.001_837_14,
    mean_longitude_deg: 34.396_440_51,
    mean_longitude_rate: 3_034.746_127_75,
    longitude_perihelion_deg: 14.728_479_83,
    longitude_perihelion_rate: 0.212_526_68,
    ascending_node_deg: 100.473_909_09,
    ascending_node_rate: 0.204_691_06,
};

const SATURN: MeanElements = MeanElements {
    semi_major_axis_au: 9.536_675_94,
    semi_major_axis_rate: -0.001_250_60,
    eccentricity: 0.053_861_79,
    eccentricity_rate: -0.000_509_91,
    inclination_deg: 2.485_991_87,
    inclination_rate: 0.001_936_09,
    mean_longitude_deg: 49.954_244_23,
    mean_longitude_rate: 1_222.493_622_01,
    longitude_perihelion_deg: 92.598_878_31,
    longitude_perihelion_rate: -0.418_972_16,
    ascending_node_deg: 113.662_424_48,
    ascending_node_rate: -0.288_677_94,
};

const URANUS: MeanElements = MeanElements {
    semi_major_axis_au: 19.189_164_64,
    semi_major_axis_rate: -0.001_961_76,
    eccentricity: 0.047_257_44,
    eccentricity_rate: -0.000_043_97,
    inclination_deg: 0.772_637_83,
    inclination_rate: -0.002_429_39,
    mean_longitude_deg: 313.238_104_51,
    mean_longitude_rate: 428.482_027_85,
    longitude_perihelion_deg: 170.954_276_30,
    longitude_perihelion_rate: 0.408_052_81,
    ascending_node_deg: 74.016_925_03,
    ascending_node_rate: 0.042_405_89,
};

const NEPTUNE: MeanElements = MeanElements {
    semi_major_axis_au: 30.069_922_76,
    semi_major_axis_rate: 0.000_262_91,
    eccentricity: 0.008_590_48,
    eccentricity_rate: 0.000_051_05,
    inclination_deg: 1.770_043_47,
    inclination_rate: 0.000_353_72,
    mean_longitude_deg: -55.120_029_69,
    mean_longitude_rate: 218.459_453_25,
    longitude_perihelion_deg: 44.964_762_27,
    longitude_perihelion_rate: -0.322_414_64,
    ascending_node_deg: 131.784_225_74,
    ascending_node_rate: -0.005_086_64,
};

const PLUTO: MeanElements = MeanElements {
    semi_major_axis_au: 39.482_116_75,
    semi_major_axis_rate: -0.000_315_96,
    eccentricity: 0.248_827_30,
    eccentricity_rate: 0.000_051_70,
    inclination_deg: 17.140_012_06,
    inclination_rate: 0.000_048_18,
    mean_longitude_deg: 238.929_038_33,
    mean_longitude_rate: 145.207_805_15,
    longitude_perihelion_deg: 224.068_916_29,
    longitude_perihelion_rate: -0.040_629_42,
    ascending_node_deg: 110.303_936_84,
    ascending_node_rate: -0.011_834_82,
};
