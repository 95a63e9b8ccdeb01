//! Medicines and their nested schedules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MedicineId, ScheduleId, UserId};
use super::schedule::{NewSchedule, Schedule};

/// A registered medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub user_id: UserId,
    pub active: bool,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Dosage with its unit, e.g. `0.5 tablet`.
    pub fn dosage_label(&self) -> Option<String> {
        let dosage = self.dosage.as_deref()?;
        Some(match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{} {}", dosage, unit),
            _ => dosage.to_string(),
        })
    }

    pub fn active_schedules(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.iter().filter(|s| s.active)
    }

    pub fn schedule(&self, id: ScheduleId) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }
}

/// Builder for creating new medicines.
#[derive(Debug, Clone)]
pub struct NewMedicine {
    pub name: String,
    pub description: Option<String>,
    pub dosage: Option<String>,
    pub unit: Option<String>,
    pub schedules: Vec<NewSchedule>,
}

impl NewMedicine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            dosage: None,
            unit: None,
            schedules: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>, unit: Option<String>) -> Self {
        self.dosage = Some(dosage.into());
        self.unit = unit;
        self
    }

    pub fn with_schedule(mut self, schedule: NewSchedule) -> Self {
        self.schedules.push(schedule);
        self
    }

    /// Materialize the medicine for `user_id`; it starts out active.
    pub fn into_medicine(self, user_id: UserId, now: DateTime<Utc>) -> Medicine {
        let id = MedicineId::new();
        let schedules = self
            .schedules
            .into_iter()
            .map(|s| s.into_schedule(id, now))
            .collect();
        Medicine {
            id,
            name: self.name,
            description: self.description,
            dosage: self.dosage,
            unit: self.unit,
            user_id,
            active: true,
            schedules,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a medicine. Unset fields are left untouched; the
/// `Option<Option<_>>` fields clear the value when set to `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub dosage: Option<Option<String>>,
    pub unit: Option<Option<String>>,
    pub active: Option<bool>,
}

impl MedicineUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn dosage(mut self, dosage: Option<String>) -> Self {
        self.dosage = Some(dosage);
        self
    }

    pub fn unit(mut self, unit: Option<String>) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.dosage.is_none()
            && self.unit.is_none()
            && self.active.is_none()
    }

    pub fn apply(&self, medicine: &mut Medicine, now: DateTime<Utc>) {
        if let Some(ref name) = self.name {
            medicine.name = name.clone();
        }
        if let Some(ref description) = self.description {
            medicine.description = description.clone();
        }
        if let Some(ref dosage) = self.dosage {
            medicine.dosage = dosage.clone();
        }
        if let Some(ref unit) = self.unit {
            medicine.unit = unit.clone();
        }
        if let Some(active) = self.active {
            medicine.active = active;
        }
        medicine.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_medicine_builder() {
        let medicine = NewMedicine::new("Vitamin D")
            .with_description("Bone health")
            .with_dosage("1", Some("tablet".to_string()))
            .with_schedule(NewSchedule::daily("08:00".parse().unwrap()))
            .into_medicine(UserId(1), Utc::now());

        assert_eq!(medicine.name, "Vitamin D");
        assert!(medicine.active);
        assert_eq!(medicine.user_id, UserId(1));
        assert_eq!(medicine.schedules.len(), 1);
        assert_eq!(medicine.schedules[0].medicine_id, medicine.id);
        assert_eq!(medicine.dosage_label().as_deref(), Some("1 tablet"));
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let mut medicine = NewMedicine::new("Aspirin")
            .with_description("Pain")
            .into_medicine(UserId(1), Utc::now());

        MedicineUpdate::new()
            .name("Aspirin 100")
            .description(None)
            .active(false)
            .apply(&mut medicine, Utc::now());

        assert_eq!(medicine.name, "Aspirin 100");
        assert_eq!(medicine.description, None);
        assert!(!medicine.active);
    }

    #[test]
    fn test_empty_update() {
        assert!(MedicineUpdate::new().is_empty());
        assert!(!MedicineUpdate::new().active(true).is_empty());
    }
}
