//! Grouping of scored shifts by worker and calendar day.
//!
//! The daily-goal bonus is paid once per worker per day, so shifts are
//! partitioned by `(worker, day)` before the bonus is resolved. The first shift
//! seen for a key is tagged as the group's representative when the group is
//! created; it is the only member that will carry the bonus.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::ScoredShift;

/// A scored shift together with its position in the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    /// Index of the shift in the batch handed to [`group_by_worker_day`].
    pub position: usize,
    /// The scored shift.
    pub shift: ScoredShift,
}

/// All shifts of one worker on one calendar day, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyGroup {
    /// The worker the shifts belong to.
    pub worker_id: String,
    /// The calendar day the shifts fall on.
    pub date: NaiveDate,
    /// Members in the order they were encountered.
    pub members: Vec<GroupMember>,
    /// Index into `members` of the shift that carries the daily-goal bonus.
    pub representative: usize,
}

impl DailyGroup {
    fn new(worker_id: String, date: NaiveDate, first: GroupMember) -> Self {
        Self {
            worker_id,
            date,
            members: vec![first],
            representative: 0,
        }
    }

    /// Sums completed deliveries across every member.
    pub fn total_deliveries(&self) -> u32 {
        self.members
            .iter()
            .fold(0u32, |total, m| total.saturating_add(m.shift.shift.deliveries()))
    }

    /// Returns a short label for logs and audit steps: `worker@date`.
    pub fn subject(&self) -> String {
        format!("{}@{}", self.worker_id, self.date)
    }
}

/// Partitions scored shifts by `(worker, calendar day)`.
///
/// Every shift lands in exactly one group. Groups are returned in the order
/// their first shift appears, and members keep their input order.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::{group_by_worker_day, score_shift};
/// use delivery_ranking::models::RawShift;
/// use chrono::NaiveDate;
///
/// let shift = |worker: &str, day: u32| RawShift {
///     worker_id: worker.to_string(),
///     worker_name: worker.to_uppercase(),
///     date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
///     scheduled_duration: None,
///     online_duration: None,
///     completed_deliveries: Some(5),
///     extra: Default::default(),
/// };
///
/// let scored = vec![shift("a", 1), shift("b", 1), shift("a", 1), shift("a", 2)]
///     .into_iter()
///     .map(|s| score_shift(s, 1).scored)
///     .collect();
///
/// let groups = group_by_worker_day(scored);
/// assert_eq!(groups.len(), 3);
/// assert_eq!(groups[0].members.len(), 2);
/// assert_eq!(groups[0].members[0].position, 0);
/// assert_eq!(groups[0].members[1].position, 2);
/// ```
pub fn group_by_worker_day(shifts: Vec<ScoredShift>) -> Vec<DailyGroup> {
    let mut groups: Vec<DailyGroup> = Vec::new();
    let mut index: HashMap<(String, NaiveDate), usize> = HashMap::new();

    for (position, shift) in shifts.into_iter().enumerate() {
        let key = (shift.shift.worker_id.clone(), shift.shift.date);
        let member = GroupMember { position, shift };

        match index.get(&key) {
            Some(&group_index) => groups[group_index].members.push(member),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DailyGroup::new(key.0, key.1, member));
            }
        }
    }

    groups
}
