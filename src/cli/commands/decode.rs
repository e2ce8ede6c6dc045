use crate::cli::parser::Commands;
use crate::core::decoder::decode;
use crate::errors::AppResult;
use crate::utils::formatting::pad_right;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Decode { details, json } = cmd {
        let d = decode(details);

        if *json {
            println!("{}", serde_json::to_string_pretty(&d)?);
            return Ok(());
        }

        let list = d.booking_list.as_ref().map(|l| l.join(" | "));
        let total = d.total_count.map(|c| c.to_string());
        let fields = [
            ("member", d.member.as_deref()),
            ("boat", d.boat.as_deref()),
            ("coach", d.coach.as_deref()),
            ("driver", d.driver.as_deref()),
            ("time", d.time.as_deref()),
            ("booking_date", d.booking_date.as_deref()),
            ("duration", d.duration.as_deref()),
            ("activity_types", d.activity_types.as_deref()),
            ("notes", d.notes.as_deref()),
            ("change_summary", d.change_summary.as_deref()),
            ("filled_by", d.filled_by.as_deref()),
            ("booking_list", list.as_deref()),
            ("total_count", total.as_deref()),
        ];

        for (label, value) in fields {
            if let Some(v) = value {
                println!("{} {}", pad_right(label, 15), v);
            }
        }
        println!("{} {}", pad_right("raw_text", 15), d.raw_text);
    }
    Ok(())
}
