use chrono::{Local, NaiveDate};
use working_days::{DateExt, WorkingDayCalendar};

fn main() -> anyhow::Result<()> {
    let mut calendar = WorkingDayCalendar::new();

    let today = Local::now().date_naive();
    println!(
        "Is {today} a working day in São Paulo? Answer is {}",
        today.is_working_day(&mut calendar)?
    );

    let due: NaiveDate = calendar.add_working_days(today, 5)?;
    println!("Five working days from today is {due}");

    for holiday in calendar.get_holidays(2025)? {
        println!("{holiday}");
    }

    Ok(())
}
