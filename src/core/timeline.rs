//! `timeline` command logic: build the fetch query and filters from CLI
//! input, run a session against the database and print the day groups.

use crate::config::Config;
use crate::core::search::{DayGroup, DecodedEntry};
use crate::core::session::TimelineSession;
use crate::db::pool::DbPool;
use crate::db::queries::SqliteLogSource;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::{Action, FilledBySelection, FilterSet, LogQuery, Operation};
use crate::ui::messages::{header, info};
use crate::utils::date::{today, trailing_window};
use crate::utils::formatting::{bold, or_dash, pad_right, wrap_indented};
use ansi_term::Colour;
use chrono::NaiveDate;

fn color_for_action(action: Action) -> Colour {
    match action {
        Action::Create => Colour::Green,
        Action::Update => Colour::Yellow,
        Action::Delete => Colour::Red,
    }
}

/// Raw CLI filter input shared by `timeline` and `export`.
#[derive(Debug, Clone, Default)]
pub struct FilterInput<'a> {
    pub range: Option<&'a str>,
    pub op: Option<&'a str>,
    pub date: Option<&'a str>,
    pub filled_by: Option<&'a str>,
    pub query: Option<&'a str>,
}

impl FilterInput<'_> {
    pub fn operation(&self) -> AppResult<Option<Operation>> {
        self.op
            .map(|op| Operation::from_code(op).ok_or_else(|| AppError::InvalidOperation(op.into())))
            .transpose()
    }

    /// Fetch parameters; without `--range` the trailing window ending today.
    pub fn log_query(&self, cfg: &Config) -> AppResult<LogQuery> {
        let range = match self.range {
            Some(r) => parse_range(r)?,
            None => trailing_window(today(), cfg.default_window_days),
        };
        Ok(LogQuery::new(range, cfg.fetch_limit).with_operation(self.operation()?))
    }

    /// In-memory predicates; blank values are treated as absent.
    pub fn filter_set(&self, cfg: &Config) -> FilterSet {
        let present = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        FilterSet {
            booking_date: present(self.date),
            filled_by: self
                .filled_by
                .and_then(|f| FilledBySelection::parse(f, &cfg.unfilled_sentinel)),
            query: present(self.query),
        }
    }
}

/// Day groups plus what produced them, for the empty-result message.
pub struct TimelineView {
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub filtered: bool,
    pub groups: Vec<DayGroup>,
}

impl TimelineView {
    fn empty_message(&self) -> String {
        let span = self
            .range
            .map(|(first, last)| format!(" between {first} and {last}"))
            .unwrap_or_default();
        if self.filtered {
            format!("No audit entries{span} match the filters.")
        } else {
            format!("No audit entries{span}.")
        }
    }
}

pub struct TimelineLogic;

impl TimelineLogic {
    /// Fetch, decode, filter and group.
    pub fn load(pool: &DbPool, query: LogQuery, filters: &FilterSet) -> TimelineView {
        let mut session = TimelineSession::new(SqliteLogSource::new(pool));
        session.refresh(query);
        tracing::debug!(rows = session.entries().len(), ?filters, "timeline snapshot");

        TimelineView {
            range: session.current_query().map(|q| q.created_range),
            filtered: !filters.is_empty(),
            groups: session.view(filters),
        }
    }

    pub fn print(view: &TimelineView, cfg: &Config) {
        if view.groups.is_empty() {
            info(view.empty_message());
            return;
        }

        for group in &view.groups {
            let title = match group.date {
                Some(d) => d.format("%Y-%m-%d (%a)").to_string(),
                None => "undated".to_string(),
            };
            header(format!("{} · {} entries", title, group.entries.len()));

            for item in &group.entries {
                Self::print_entry(item, cfg);
            }
            println!();
        }
    }

    pub fn print_json(groups: &[DayGroup]) -> AppResult<()> {
        println!("{}", serde_json::to_string_pretty(groups)?);
        Ok(())
    }

    fn print_entry(item: &DecodedEntry, cfg: &Config) {
        let e = &item.entry;
        let d = &item.decoded;

        let time = e
            .created_at
            .map(|ts| ts.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        let action = color_for_action(e.action).paint(pad_right(e.action.to_db_str(), 6));
        let domain = if e.is_coach_assignment() {
            Colour::Purple.paint(" [schedule]").to_string()
        } else {
            String::new()
        };

        println!(
            "{} {}{}  {} {}  {} {}",
            time,
            action,
            domain,
            bold(or_dash(d.time.as_deref())),
            pad_right(or_dash(d.boat.as_deref()), 8),
            or_dash(d.member.as_deref()),
            d.filled_by
                .as_deref()
                .map(|f| format!("(填表人: {f})"))
                .unwrap_or_default(),
        );

        let extras: Vec<String> = [
            ("coach", d.coach.as_deref()),
            ("driver", d.driver.as_deref()),
            ("activity", d.activity_types.as_deref()),
            ("duration", d.duration.as_deref()),
            ("notes", d.notes.as_deref()),
            ("change", d.change_summary.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, v)| v.map(|v| format!("{label}: {v}")))
        .collect();
        if !extras.is_empty() {
            println!("{}", wrap_indented(&extras.join("  "), cfg.wrap_width, 6));
        }

        if let Some(list) = &d.booking_list {
            let total = d.total_count.unwrap_or(list.len());
            println!("      {} of {} bookings:", list.len(), total);
            for b in list {
                println!("        · {}", b);
            }
        }

        if let Some(actor) = &e.actor_email {
            println!("      by {}", Colour::Fixed(244).paint(actor.as_str()));
        }
        println!(
            "{}",
            Colour::Fixed(244).paint(wrap_indented(&d.raw_text, cfg.wrap_width, 6))
        );
    }
}
