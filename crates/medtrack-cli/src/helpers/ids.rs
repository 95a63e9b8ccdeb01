//! Resolve user-typed references to entity IDs.
//!
//! Any ID can be given in full or as a unique prefix (the short form shown
//! in tables is the first 8 characters). Medicines can also be named.

use std::fmt::Display;

use medtrack_core::model::{LogId, MedicineId, ScheduleId};
use medtrack_core::EntityStore;

use crate::errors::CliError;

/// Shortest prefix accepted, so that one or two typed characters never
/// silently pick an entity.
const MIN_PREFIX_LEN: usize = 4;

fn by_prefix<T, I>(ids: I, input: &str, kind: &str, hint: &str) -> anyhow::Result<Option<T>>
where
    T: Copy + Display,
    I: IntoIterator<Item = T>,
{
    let needle = input.trim().to_ascii_lowercase();
    if needle.len() < MIN_PREFIX_LEN {
        return Ok(None);
    }
    let matches: Vec<T> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [] => Ok(None),
        [id] => Ok(Some(*id)),
        _ => Err(CliError::invalid_input(format!(
            "{} ID prefix \"{}\" is ambiguous ({} matches)\n{}",
            kind,
            input.trim(),
            matches.len(),
            hint
        ))
        .into()),
    }
}

/// Resolve a medicine by ID, ID prefix or exact name (case-insensitive).
pub fn resolve_medicine(store: &EntityStore, input: &str) -> anyhow::Result<MedicineId> {
    const HINT: &str = "Hint: Run `medtrack medicines list` to see medicine IDs.";
    if let Some(id) = by_prefix(store.medicines().iter().map(|m| m.id), input, "Medicine", HINT)? {
        return Ok(id);
    }

    let wanted = input.trim();
    let named: Vec<MedicineId> = store
        .medicines()
        .iter()
        .filter(|m| m.name.eq_ignore_ascii_case(wanted))
        .map(|m| m.id)
        .collect();
    match named.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(format!("Medicine \"{}\" not found", wanted), HINT).into()),
        _ => Err(CliError::invalid_input(format!(
            "{} medicines are named \"{}\"; use an ID instead\n{}",
            named.len(),
            wanted,
            HINT
        ))
        .into()),
    }
}

pub fn resolve_schedule(store: &EntityStore, input: &str) -> anyhow::Result<ScheduleId> {
    const HINT: &str = "Hint: Run `medtrack schedules list` to see schedule IDs.";
    let ids = store
        .medicines()
        .iter()
        .flat_map(|m| m.schedules.iter().map(|s| s.id));
    by_prefix(ids, input, "Schedule", HINT)?.ok_or_else(|| {
        CliError::not_found(format!("Schedule \"{}\" not found", input.trim()), HINT).into()
    })
}

pub fn resolve_log(store: &EntityStore, input: &str) -> anyhow::Result<LogId> {
    const HINT: &str = "Hint: Run `medtrack logs list` to see log IDs.";
    by_prefix(store.logs().iter().map(|l| l.id), input, "Log", HINT)?.ok_or_else(|| {
        CliError::not_found(format!("Log \"{}\" not found", input.trim()), HINT).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;
    use crate::errors::exit_code_for;
    use chrono::{NaiveDate, Utc};
    use medtrack_core::model::UserId;
    use medtrack_core::session::sample_data;

    fn seeded() -> EntityStore {
        let today = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        sample_data(UserId(1), today, Utc::now()).unwrap()
    }

    #[test]
    fn test_medicine_by_name_prefix_and_full_id() {
        let store = seeded();
        let vitamin = store.medicines()[0].id;

        assert_eq!(resolve_medicine(&store, "vitamin d").unwrap(), vitamin);
        assert_eq!(resolve_medicine(&store, &vitamin.to_string()).unwrap(), vitamin);
        let short = &vitamin.to_string()[..8];
        assert_eq!(resolve_medicine(&store, short).unwrap(), vitamin);
    }

    #[test]
    fn test_unknown_medicine_is_not_found() {
        let err = resolve_medicine(&seeded(), "Aspirin").unwrap_err();
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
        assert!(err.to_string().contains("medtrack medicines list"));
    }

    #[test]
    fn test_short_prefixes_are_ignored() {
        let store = seeded();
        let log = &store.logs()[0];
        let err = resolve_log(&store, &log.id.to_string()[..2]).unwrap_err();
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
        assert_eq!(resolve_log(&store, &log.id.to_string()[..8]).unwrap(), log.id);
    }

    #[test]
    fn test_schedule_lookup_spans_medicines() {
        let store = seeded();
        let evening = store.medicines()[1].schedules[1].id;
        assert_eq!(resolve_schedule(&store, &evening.to_string()).unwrap(), evening);
    }
}
