//! In-memory entity store.
//!
//! Holds medicines (with their nested schedules) and dose logs in insertion
//! order. Mutations never fail: an unknown identifier is a no-op reported
//! through the return value.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{
    LogId, LogUpdate, MedicationLog, Medicine, MedicineId, MedicineUpdate, NewSchedule, Schedule,
    ScheduleId, ScheduleUpdate, UNKNOWN_MEDICINE_NAME,
};

/// A medicine removed by [`EntityStore::delete_medicine`], with the number of
/// logs that went with it.
#[derive(Debug, Clone)]
pub struct DeletedMedicine {
    pub medicine: Medicine,
    pub removed_logs: usize,
}

/// Ordered collections of medicines and logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    medicines: Vec<Medicine>,
    logs: Vec<MedicationLog>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(medicines: Vec<Medicine>, logs: Vec<MedicationLog>) -> Self {
        Self { medicines, logs }
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn logs(&self) -> &[MedicationLog] {
        &self.logs
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty() && self.logs.is_empty()
    }

    /// Drop every medicine and log.
    pub fn clear(&mut self) {
        self.medicines.clear();
        self.logs.clear();
    }

    // --- Medicines ---

    pub fn add_medicine(&mut self, medicine: Medicine) {
        self.medicines.push(medicine);
    }

    pub fn medicine(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// Name of the medicine, or the fallback name for a dangling reference.
    pub fn medicine_name(&self, id: MedicineId) -> &str {
        self.medicine(id)
            .map(|m| m.name.as_str())
            .unwrap_or(UNKNOWN_MEDICINE_NAME)
    }

    /// Merge `update` into the matching medicine. Returns `false` if absent.
    pub fn update_medicine(&mut self, id: MedicineId, update: &MedicineUpdate) -> bool {
        match self.medicines.iter_mut().find(|m| m.id == id) {
            Some(medicine) => {
                update.apply(medicine, Utc::now());
                true
            }
            None => false,
        }
    }

    /// Remove the medicine and every log that references it.
    pub fn delete_medicine(&mut self, id: MedicineId) -> Option<DeletedMedicine> {
        let index = self.medicines.iter().position(|m| m.id == id)?;
        let medicine = self.medicines.remove(index);
        let before = self.logs.len();
        self.logs.retain(|l| l.medicine_id != id);
        Some(DeletedMedicine {
            medicine,
            removed_logs: before - self.logs.len(),
        })
    }

    // --- Schedules ---

    /// Attach a new schedule to a medicine. Returns `None` if the medicine
    /// does not exist.
    pub fn add_schedule(&mut self, medicine_id: MedicineId, schedule: NewSchedule) -> Option<ScheduleId> {
        let medicine = self.medicines.iter_mut().find(|m| m.id == medicine_id)?;
        let now = Utc::now();
        let schedule = schedule.into_schedule(medicine_id, now);
        let id = schedule.id;
        medicine.schedules.push(schedule);
        medicine.updated_at = now;
        Some(id)
    }

    /// Find a schedule and the medicine it belongs to.
    pub fn schedule(&self, id: ScheduleId) -> Option<(&Medicine, &Schedule)> {
        self.medicines
            .iter()
            .find_map(|m| m.schedule(id).map(|s| (m, s)))
    }

    pub fn update_schedule(&mut self, id: ScheduleId, update: &ScheduleUpdate) -> bool {
        let found = self
            .medicines
            .iter_mut()
            .flat_map(|m| m.schedules.iter_mut())
            .find(|s| s.id == id);
        match found {
            Some(schedule) => {
                update.apply(schedule, Utc::now());
                true
            }
            None => false,
        }
    }

    pub fn delete_schedule(&mut self, id: ScheduleId) -> Option<Schedule> {
        for medicine in self.medicines.iter_mut() {
            if let Some(index) = medicine.schedules.iter().position(|s| s.id == id) {
                medicine.updated_at = Utc::now();
                return Some(medicine.schedules.remove(index));
            }
        }
        None
    }

    // --- Logs ---

    pub fn add_log(&mut self, log: MedicationLog) {
        self.logs.push(log);
    }

    pub fn log(&self, id: LogId) -> Option<&MedicationLog> {
        self.logs.iter().find(|l| l.id == id)
    }

    pub fn logs_for_medicine(&self, medicine_id: MedicineId) -> impl Iterator<Item = &MedicationLog> {
        self.logs.iter().filter(move |l| l.medicine_id == medicine_id)
    }

    pub fn update_log(&mut self, id: LogId, update: &LogUpdate) -> bool {
        match self.logs.iter_mut().find(|l| l.id == id) {
            Some(log) => {
                update.apply(log, Utc::now());
                true
            }
            None => false,
        }
    }

    pub fn delete_log(&mut self, id: LogId) -> Option<MedicationLog> {
        let index = self.logs.iter().position(|l| l.id == id)?;
        Some(self.logs.remove(index))
    }
}
