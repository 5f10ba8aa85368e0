//! State encoding for a single container record

use crate::models::{ContainerRecord, ContainerState};

/// Compute the full (state, value) assignment for one container.
///
/// Every tracked state is always emitted: the label matching the record's
/// state gets 1.0 and all others get 0.0, so a label that was 1 in an earlier
/// cycle is driven back to 0 when the container transitions away from it. A
/// state string outside the tracked vocabulary yields 0.0 everywhere.
pub fn encode(record: &ContainerRecord) -> [(ContainerState, f64); 6] {
    ContainerState::ALL.map(|state| {
        let value = if record.state == state.as_str() {
            1.0
        } else {
            0.0
        };
        (state, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str) -> ContainerRecord {
        ContainerRecord {
            id: "abc123".to_string(),
            image: "nginx:latest".to_string(),
            name: "web".to_string(),
            state: state.to_string(),
        }
    }

    #[test]
    fn test_encode_sets_exactly_one_label_for_known_state() {
        let assignment = encode(&record("running"));

        assert_eq!(assignment.len(), ContainerState::ALL.len());
        for (state, value) in assignment {
            if state == ContainerState::Running {
                assert_eq!(value, 1.0);
            } else {
                assert_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn test_encode_emits_all_zeros_for_unknown_state() {
        let assignment = encode(&record("removing"));

        for (_, value) in assignment {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_encode_always_covers_full_vocabulary() {
        let assignment = encode(&record("exited"));
        let states: Vec<ContainerState> = assignment.iter().map(|(s, _)| *s).collect();

        assert_eq!(states, ContainerState::ALL.to_vec());
    }
}
