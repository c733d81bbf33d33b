use lunisolar::{to_lunisolar, year_label, Config, ConfigError, GregorianDate, SolarTermName};

// Kept alone in its own test binary: the global configuration is published
// once per process.
#[test]
fn installed_config_drives_crate_root_queries() {
    let installed = Config::default()
        .with_utc_offset_minutes(0)
        .with_sexagenary_epoch(5)
        .install()
        .unwrap();
    assert_eq!(installed.utc_offset_minutes, 0);
    assert_eq!(Config::global(), installed);

    assert_eq!(
        Config::default().install(),
        Err(ConfigError::AlreadyInstalled)
    );

    assert_eq!(year_label(1985).0.to_string(), "甲子");

    // Leap month 2 of 2023 began at 17:23 UTC on March 21.
    let lunar = to_lunisolar(GregorianDate::new(2023, 3, 21).unwrap()).unwrap();
    assert_eq!((lunar.month(), lunar.day(), lunar.is_leap_month()), (2, 1, true));

    let minor_cold = lunisolar::compute_year_terms(2024).unwrap();
    assert_eq!(minor_cold.first().name, SolarTermName::MinorCold);
    assert_eq!(minor_cold.first().date, GregorianDate::new(2024, 1, 5).unwrap());
}
