use lunisolar::{
    compute_year_terms, nearest_terms, to_lunisolar, year_label, Calendar, CalendarError, Config,
    GregorianDate, LunisolarDate, SolarModel, SolarTermName,
};

fn date(y: i32, m: u32, d: u32) -> GregorianDate {
    GregorianDate::new(y, m, d).unwrap()
}

fn calendar() -> Calendar {
    Calendar::new(Config::default()).unwrap()
}

#[test]
fn new_year_days() {
    for (y, m, d) in [
        (2000, 2, 5),
        (2017, 1, 28),
        (2020, 1, 25),
        (2021, 2, 12),
        (2023, 1, 22),
        (2024, 2, 10),
        (2025, 1, 29),
    ] {
        let new_year = to_lunisolar(date(y, m, d)).unwrap();
        assert_eq!(
            (new_year.year(), new_year.month(), new_year.day(), new_year.is_leap_month()),
            (y, 1, 1, false),
            "{y}-{m}-{d}"
        );
        let eve = to_lunisolar(date(y, m, d).add_days(-1).unwrap()).unwrap();
        assert_eq!((eve.year(), eve.month()), (y - 1, 12));
        assert!(eve.day() == 29 || eve.day() == 30);
    }
}

#[test]
fn documented_leap_months() {
    let calendar = calendar();
    for (year, leap, (y, m, d)) in [
        (2017, 6, (2017, 7, 23)),
        (2020, 4, (2020, 5, 23)),
        (2023, 2, (2023, 3, 22)),
        (2025, 6, (2025, 7, 25)),
    ] {
        let months = calendar.lunisolar_year(year).unwrap();
        assert_eq!(months.leap_month(), Some(leap), "{year}");
        assert_eq!(months.months().len(), 13);
        assert_eq!(months.months().iter().filter(|m| m.is_leap).count(), 1);

        let first = to_lunisolar(date(y, m, d)).unwrap();
        assert_eq!(first, LunisolarDate::new(year, leap, 1, true).unwrap());
    }
    for year in [2018, 2019, 2021, 2022, 2024] {
        let months = calendar.lunisolar_year(year).unwrap();
        assert_eq!(months.leap_month(), None, "{year}");
        assert_eq!(months.months().len(), 12);
    }
}

#[test]
fn conversion_invariants_over_several_years() {
    let calendar = calendar();
    let mut day = date(2015, 1, 1);
    let end = date(2026, 1, 1);
    while day < end {
        let lunar = calendar.to_lunisolar(day).unwrap();
        assert!((1..=12).contains(&lunar.month()), "{day}: {lunar}");
        assert!((1..=30).contains(&lunar.day()), "{day}: {lunar}");
        assert_eq!(calendar.to_lunisolar(day).unwrap(), lunar);
        day = day.add_days(11).unwrap();
    }
}

#[test]
fn consecutive_days_advance_by_one() {
    let calendar = calendar();
    let mut day = date(2017, 6, 1);
    let mut previous = calendar.to_lunisolar(day).unwrap();
    for _ in 0..120 {
        day = day.add_days(1).unwrap();
        let current = calendar.to_lunisolar(day).unwrap();
        if current.day() == 1 {
            assert!(previous.day() == 29 || previous.day() == 30, "{day}");
            assert_ne!(
                (current.month(), current.is_leap_month()),
                (previous.month(), previous.is_leap_month())
            );
        } else {
            assert_eq!(current.day(), previous.day() + 1, "{day}");
            assert_eq!(current.month(), previous.month());
            assert_eq!(current.is_leap_month(), previous.is_leap_month());
        }
        previous = current;
    }
}

#[test]
fn lunisolar_round_trip_for_whole_years() {
    let calendar = calendar();
    for year in [2017, 2023, 2024] {
        let months = calendar.lunisolar_year(year).unwrap();
        for month in months.months() {
            for day in 1..=month.length {
                let lunar = LunisolarDate::new(year, month.number, day, month.is_leap).unwrap();
                let gregorian = calendar.to_gregorian(lunar).unwrap();
                assert_eq!(calendar.to_lunisolar(gregorian).unwrap(), lunar);
            }
        }
    }
}

#[test]
fn nonexistent_lunisolar_dates_are_rejected() {
    let calendar = calendar();
    let no_leap = LunisolarDate::new(2024, 3, 1, true).unwrap();
    assert!(matches!(
        calendar.to_gregorian(no_leap),
        Err(CalendarError::InvalidDate { .. })
    ));
    assert!(matches!(
        GregorianDate::new(2023, 4, 31),
        Err(CalendarError::InvalidDate { .. })
    ));
}

#[test]
fn year_labels_repeat_every_sixty_years() {
    assert_eq!(year_label(1984).0.to_string(), "甲子");
    assert_eq!(year_label(2000).0.to_string(), "庚辰");
    assert_eq!(year_label(2025).1.english(), "Snake");
    for year in 1900..2100 {
        assert_eq!(year_label(year), year_label(year + 60));
    }
}

#[test]
fn term_tables_are_complete_and_ordered() {
    let calendar = calendar();
    for year in [1850, 1949, 2000, 2024, 2150] {
        let table = calendar.compute_year_terms(year).unwrap();
        assert_eq!(table.terms().len(), 24);
        for (term, name) in table.iter().zip(SolarTermName::ALL) {
            assert_eq!(term.name, name);
            assert_eq!(term.date.year(), year);
        }
        assert!(table.terms().windows(2).all(|w| w[0].instant < w[1].instant));
        for term in &table {
            let lon = calendar
                .ephemeris()
                .sun_apparent_longitude(term.instant)
                .unwrap()
                .value();
            let miss = (lon - term.name.longitude().value() + 540.0) % 360.0 - 180.0;
            assert!(miss.abs() < 1e-4, "{year} {term}");
        }
    }
}

#[test]
fn equinoxes_and_solstices() {
    let table = compute_year_terms(2024).unwrap();
    assert_eq!(table.get(SolarTermName::SpringEquinox).date, date(2024, 3, 20));
    assert_eq!(table.get(SolarTermName::SummerSolstice).date, date(2024, 6, 21));
    assert_eq!(table.get(SolarTermName::AutumnEquinox).date, date(2024, 9, 22));
    assert_eq!(table.get(SolarTermName::WinterSolstice).date, date(2024, 12, 21));
    assert_eq!(
        compute_year_terms(2021).unwrap().get(SolarTermName::SpringEquinox).date,
        date(2021, 3, 20)
    );
    assert_eq!(
        compute_year_terms(2000).unwrap().get(SolarTermName::WinterSolstice).date,
        date(2000, 12, 21)
    );
}

#[test]
fn winter_solstice_day_is_fifteen_days_from_minor_cold() {
    let calendar = calendar();
    for year in (1990..2030).step_by(3) {
        let solstice = calendar.compute_year_terms(year).unwrap().last().date;
        let near = calendar.nearest_terms(solstice).unwrap();
        assert_eq!(near.previous.name, SolarTermName::WinterSolstice);
        assert_eq!(near.days_since, 0);
        assert_eq!(near.next.name, SolarTermName::MinorCold);
        assert!((14..=16).contains(&near.days_until), "{year}");
    }
}

#[test]
fn nearest_term_distances_add_up() {
    let calendar = calendar();
    let mut day = date(2023, 12, 1);
    for _ in 0..60 {
        let near = calendar.nearest_terms(day).unwrap();
        assert!(near.days_since >= 0 && near.days_until >= 1, "{day}");
        assert_eq!(
            near.days_since + near.days_until,
            near.next.date.days_since(near.previous.date)
        );
        assert_eq!(near.previous.name.next(), near.next.name);
        day = day.add_days(1).unwrap();
    }
}

#[test]
fn january_first_looks_back_to_the_previous_solstice() {
    let near = nearest_terms(date(2025, 1, 1)).unwrap();
    assert_eq!(near.previous.name, SolarTermName::WinterSolstice);
    assert_eq!(near.previous.date, date(2024, 12, 21));
    assert_eq!(near.days_since, 11);
    assert_eq!(near.next.date, date(2025, 1, 5));
    assert_eq!(near.days_until, 4);
}

#[test]
fn utc_offset_moves_day_boundaries() {
    // Minor Cold 2024 fell at 04:49 Beijing time, still January 5 in UTC.
    let utc = Calendar::new(Config::default().with_utc_offset_minutes(0)).unwrap();
    let table = utc.compute_year_terms(2024).unwrap();
    assert_eq!(table.first().date, date(2024, 1, 5));
    assert_eq!(compute_year_terms(2024).unwrap().first().date, date(2024, 1, 6));
}

#[test]
fn low_precision_model_agrees_on_dates() {
    let coarse = Calendar::new(Config::default().with_solar_model(SolarModel::EquationOfCenter))
        .unwrap();
    for (y, m, d) in [(2000, 1, 1), (2017, 7, 23), (2024, 2, 10)] {
        assert_eq!(
            coarse.to_lunisolar(date(y, m, d)).unwrap(),
            to_lunisolar(date(y, m, d)).unwrap()
        );
    }
}

#[test]
fn day_info_combines_every_query() {
    let info = calendar().day_info(date(2024, 12, 21)).unwrap();
    assert_eq!(info.lunisolar.to_string(), "2024-11-21");
    assert_eq!(info.zodiac.chinese(), "龙");
    assert_eq!(
        info.solar_term.map(|t| t.name),
        Some(SolarTermName::WinterSolstice)
    );
    assert_eq!(info.nearest_terms.days_until, 15);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_results_and_config() {
    let info = calendar().day_info(date(2017, 7, 23)).unwrap();
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"2017-07-23\""));
    let back: lunisolar::DayInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back.lunisolar, info.lunisolar);
    assert_eq!(back.nearest_terms.previous.name, info.nearest_terms.previous.name);

    let config: Config =
        serde_json::from_str(r#"{"utc_offset_minutes": 540, "solar_model": "equation_of_center"}"#)
            .unwrap();
    assert_eq!(config.utc_offset_minutes, 540);
    assert_eq!(config.solar_model, SolarModel::EquationOfCenter);
    assert_eq!(config.first_year, Config::default().first_year);
}
