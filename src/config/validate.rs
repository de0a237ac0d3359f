// src/config/validate.rs

//! Validation from raw to usable configuration.

use tracing::debug;

use crate::errors::PpschedError;
use crate::interval::ModelDate;
use crate::plan::derivation_order;

use super::model::{ConfigFile, RawConfigFile, parse_calendar};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PpschedError;

    fn try_from(raw: RawConfigFile) -> Result<Self, Self::Error> {
        if raw.component.is_empty() {
            return Err(PpschedError::ConfigError(
                "no components configured".to_string(),
            ));
        }

        let sim_start = ModelDate::parse(&raw.experiment.base_date)?;
        let calendar = match &raw.experiment.calendar {
            Some(c) => parse_calendar(c)?,
            None => Default::default(),
        };

        let config = ConfigFile::new_unchecked(raw, sim_start, calendar);

        // Surface per-component problems at load time rather than mid-run:
        // bad dates, unknown frequencies, and derivation cycles all fail
        // here. Malformed chunk strings are deliberately left for the
        // planner, which isolates them to their own output.
        for component in config.components()? {
            let order = derivation_order(&component)?;
            debug!(component = %component.name, order = ?order, "derivation order");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<ConfigFile, PpschedError> {
        let raw: RawConfigFile = toml::from_str(toml_str)?;
        raw.try_into()
    }

    const MINIMAL: &str = r#"
        [experiment]
        name = "ESM4_historical"
        state_dir = "/work/state"
        archive_dir = "/archive/ESM4"
        base_date = "00010101"
        calendar = "noleap"

        [component.atmos_month]
        time_series = [
            { freq = "monthly", chunk = "1yr" },
            { freq = "monthly", chunk = "5yr" },
        ]
    "#;

    #[test]
    fn minimal_config_validates() {
        let config = parse(MINIMAL).unwrap();
        let components = config.components().unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "atmos_month");
        assert_eq!(components[0].outputs.len(), 2);
        assert_eq!(components[0].sim_start, ModelDate::new(1, 1, 1));
    }

    #[test]
    fn empty_component_table_is_rejected() {
        let err = parse(
            r#"
            [experiment]
            name = "x"
            state_dir = "/s"
            archive_dir = "/a"
            base_date = "00010101"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PpschedError::ConfigError(_)));
    }

    #[test]
    fn unknown_frequency_fails_at_load() {
        let err = parse(
            r#"
            [experiment]
            name = "x"
            state_dir = "/s"
            archive_dir = "/a"
            base_date = "00010101"

            [component.ocean]
            time_series = [{ freq = "fortnightly", chunk = "1yr" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PpschedError::ConfigError(_)));
    }

    #[test]
    fn component_overrides_take_effect() {
        let config = parse(
            r#"
            [experiment]
            name = "x"
            state_dir = "/s"
            archive_dir = "/a"
            base_date = "00010101"

            [component.ice_month]
            start = "00110101"
            calendar = "julian"
            time_series = [{ freq = "monthly", chunk = "1yr" }]
            "#,
        )
        .unwrap();
        let component = config.component("ice_month").unwrap();
        assert_eq!(component.sim_start, ModelDate::new(11, 1, 1));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse(
            r#"
            [experiment]
            name = "x"
            state_dir = "/s"
            archive_dir = "/a"
            base_date = "00010101"
            frobnicate = true

            [component.atmos]
            time_series = [{ freq = "monthly", chunk = "1yr" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PpschedError::TomlError(_)));
    }
}
