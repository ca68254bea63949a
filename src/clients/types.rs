use serde::{Deserialize, Serialize};

/// How many times a failed request is re-sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Idempotent reads: two retries
    Read,
    /// State-changing calls: one retry
    Mutation,
}

impl RetryPolicy {
    pub fn retries(&self) -> u32 {
        match self {
            RetryPolicy::Read => 2,
            RetryPolicy::Mutation => 1,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.retries() + 1
    }
}

/// Optional filters for listing rooms
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoomFilter {
    /// Only rooms on this floor
    pub floor: Option<u32>,
    /// Only booked (`true`) or free (`false`) rooms
    pub is_booked: Option<bool>,
}

impl RoomFilter {
    pub fn floor(floor: u32) -> Self {
        Self {
            floor: Some(floor),
            ..Self::default()
        }
    }

    pub fn booked(mut self, is_booked: bool) -> Self {
        self.is_booked = Some(is_booked);
        self
    }

    /// Query string pairs, in the order the backend documents them
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(floor) = self.floor {
            query.push(("floor", floor.to_string()));
        }
        if let Some(is_booked) = self.is_booked {
            query.push(("isBooked", is_booked.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_query() {
        assert!(RoomFilter::default().to_query().is_empty());
    }

    #[test]
    fn filter_serializes_both_fields() {
        let query = RoomFilter::floor(3).booked(false).to_query();
        assert_eq!(
            query,
            vec![("floor", "3".to_string()), ("isBooked", "false".to_string())]
        );
    }

    #[test]
    fn reads_get_one_more_retry_than_mutations() {
        assert_eq!(RetryPolicy::Read.attempts(), 3);
        assert_eq!(RetryPolicy::Mutation.attempts(), 2);
    }
}
