//! `timeoff` command logic: store coach unavailability and list it merged.

use crate::core::merge::merge_ranges_by_coach;
use crate::db::log::{LogOp, ttlog};
use crate::db::models::NewTimeOff;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_time_off, load_time_off};
use crate::errors::{AppError, AppResult};
use crate::models::MergedTimeOffRange;
use crate::ui::messages::{header, info};
use crate::utils::date::parse_date;
use crate::utils::formatting::pad_right;
use std::collections::BTreeMap;

pub struct TimeOffLogic;

impl TimeOffLogic {
    pub fn add(
        pool: &DbPool,
        coach: &str,
        start: &str,
        end: &str,
        reason: Option<&str>,
    ) -> AppResult<i64> {
        let coach = coach.trim();
        if coach.is_empty() {
            return Err(AppError::InvalidInput("coach id must not be empty".into()));
        }
        let start_date = parse_date(start).ok_or_else(|| AppError::InvalidDate(start.into()))?;
        let end_date = parse_date(end).ok_or_else(|| AppError::InvalidDate(end.into()))?;

        let id = insert_time_off(
            &pool.conn,
            &NewTimeOff {
                coach_id: coach.to_string(),
                start_date,
                end_date,
                reason: reason.map(str::to_string),
            },
        )?;

        ttlog(
            &pool.conn,
            LogOp::TimeOff,
            coach,
            &format!("Time off {start_date} → {end_date}"),
        )?;
        Ok(id)
    }

    pub fn merged(pool: &DbPool, coach: Option<&str>) -> AppResult<BTreeMap<String, Vec<MergedTimeOffRange>>> {
        let ranges = load_time_off(&pool.conn, coach)?;
        Ok(merge_ranges_by_coach(&ranges))
    }

    pub fn print(merged: &BTreeMap<String, Vec<MergedTimeOffRange>>) {
        if merged.is_empty() {
            info("No time off recorded.");
            return;
        }

        for (coach, ranges) in merged {
            header(coach);
            for m in ranges {
                let ids = m
                    .merged_ids
                    .iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                println!(
                    "  {} {}  #{}",
                    pad_right(&m.display_text, 16),
                    pad_right(m.range.reason_key().unwrap_or("-"), 12),
                    ids
                );
            }
            println!();
        }
    }
}
