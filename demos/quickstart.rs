use chrono::{FixedOffset, Utc};
use lunisolar::{Calendar, Config, GregorianDate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calendar = Calendar::new(Config::default())?;
    let today: GregorianDate = Utc::now()
        .with_timezone(&FixedOffset::east_opt(8 * 3600).ok_or("bad offset")?)
        .date_naive()
        .into();

    let info = calendar.day_info(today)?;
    let near = &info.nearest_terms;

    println!("Gregorian:  {}", info.date);
    println!("Lunisolar:  {}", info.lunisolar);
    println!("Year:       {} ({})", info.year_label, info.zodiac.english());
    println!("Day:        {}", info.day_label);
    println!(
        "Terms:      {} {} days ago, {} in {} days",
        near.previous.name, near.days_since, near.next.name, near.days_until
    );
    Ok(())
}
