//! Mechanism for loading and sharing the classification configuration

use crate::{
    ancestry::DEFAULT_MAX_DEPTH,
    isolation::IsolationCone,
    numeric::{units::GEV, Float},
};

use eyre::{ensure, eyre, Result, WrapErr};

use std::{fmt, str::FromStr};

/// Classification configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Jets below this transverse momentum are discarded, 0 disables the cut
    /// (MeV)
    pub jet_pt_cut: Float,

    /// Jets closer than this to a prompt photon or electron are discarded
    pub overlap_dr: Float,

    /// Jets closer than this to a heavy flavour hadron get its flavour
    pub flavour_dr: Float,

    /// Heavy flavour hadrons must be above this transverse momentum to label
    /// jets (MeV)
    pub flavour_hadron_pt_min: Float,

    /// Cone used when computing particle isolation
    pub isolation: IsolationCone,

    /// Bound on the number of steps of decay graph walks
    pub max_ancestry_depth: usize,
}
//
impl Configuration {
    /// Load the configuration from a file and check it
    pub fn load(file_name: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Failed to read configuration file {file_name}"))?;
        Self::parse(&config_str)
    }

    /// Decode and check the contents of a configuration file
    ///
    /// Configuration items are the first non-whitespace chunk of text on each
    /// line, anything after that on the line is a comment. Blank lines are
    /// ignored. Transverse momenta are given in GeV.
    ///
    pub fn parse(config_str: &str) -> Result<Self> {
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // This closure fetches the next configuration item, tagging it with
        // the name of the configuration field which it is supposed to fill to
        // ease error reporting, and handling unexpected end-of-file too.
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| eyre!("Missing configuration of {}", name))
        };

        // Decode the configuration items into concrete values
        let jet_pt_cut = next_item("jet_pt_cut")?.parse::<Float>()? * GEV;
        let overlap_dr = next_item("overlap_dr")?.parse::<Float>()?;
        let flavour_dr = next_item("flavour_dr")?.parse::<Float>()?;
        let flavour_hadron_pt_min = next_item("flavour_hadron_pt_min")?.parse::<Float>()? * GEV;
        let isolation_radius = next_item("isolation_radius")?.parse::<Float>()?;
        let isolation_pt_cut = next_item("isolation_pt_cut")?.parse::<Float>()? * GEV;
        let isolation_charged_only = next_item("isolation_charged_only")?.parse_bool()?;
        let max_ancestry_depth = next_item("max_ancestry_depth")?.parse::<usize>()?;

        // Species exclusions keep their defaults, a cut of 0 means no cut
        let isolation = IsolationCone {
            radius: isolation_radius,
            charged_only: isolation_charged_only,
            pt_cut: (isolation_pt_cut > 0.).then_some(isolation_pt_cut),
            ..IsolationCone::default()
        };

        let config = Configuration {
            jet_pt_cut,
            overlap_dr,
            flavour_dr,
            flavour_hadron_pt_min,
            isolation,
            max_ancestry_depth,
        };
        config.check()?;
        Ok(config)
    }

    /// Reject configurations which cannot make sense
    fn check(&self) -> Result<()> {
        ensure!(self.jet_pt_cut >= 0., "The jet pt cut cannot be negative");
        ensure!(
            self.overlap_dr >= 0. && self.flavour_dr >= 0. && self.isolation.radius >= 0.,
            "Angular distances cannot be negative"
        );
        ensure!(
            self.flavour_hadron_pt_min >= 0.,
            "The flavour labelling pt threshold cannot be negative"
        );
        ensure!(
            self.max_ancestry_depth > 0,
            "Decay graph walks must be allowed at least one step"
        );
        Ok(())
    }
}
//
impl Default for Configuration {
    /// Settings of the reference truth-level analysis
    fn default() -> Self {
        Self {
            jet_pt_cut: 0.,
            overlap_dr: 0.4,
            flavour_dr: 0.4,
            flavour_hadron_pt_min: 5. * GEV,
            isolation: IsolationCone::default(),
            max_ancestry_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
//
impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "JET_PT_CUT     : {} GeV", self.jet_pt_cut / GEV)?;
        writeln!(f, "OVERLAP_DR     : {}", self.overlap_dr)?;
        writeln!(f, "FLAVOUR_DR     : {}", self.flavour_dr)?;
        writeln!(f, "FLAVOUR_PT_MIN : {} GeV", self.flavour_hadron_pt_min / GEV)?;
        writeln!(f, "ISO_RADIUS     : {}", self.isolation.radius)?;
        match self.isolation.pt_cut {
            Some(cut) => writeln!(f, "ISO_PT_CUT     : {} GeV", cut / GEV)?,
            None => writeln!(f, "ISO_PT_CUT     : none")?,
        }
        writeln!(f, "ISO_CHARGED    : {}", self.isolation.charged_only)?;
        writeln!(f, "ISO_IGNORED    : {:?}", self.isolation.ignored_species)?;
        write!(f, "MAX_DEPTH      : {}", self.max_ancestry_depth)
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }

    /// Parse this data using special logic which handles Fortran's bool syntax
    fn parse_bool(self) -> Result<bool> {
        match self.data.to_lowercase().as_str() {
            // Handle FORTRAN booleans as a special case
            ".true." => Ok(true),
            ".false." => Ok(false),
            // Delegate other booleans to the standard Rust parser
            _ => self.parse::<bool>(),
        }
    }
}
