//! Arm identifier type.
//!
//! A `Bandit` accepts any hashable arm type, so plain `usize` indices or `&str`
//! labels work directly. `Arm` exists for callers that want to mix both in a
//! single arm set.

use std::fmt;
use std::hash::Hash;

/// An opaque arm identifier: either a numeric index or a string label.
///
/// # Examples
///
/// ```
/// use bandit_sim::Arm;
///
/// let by_index = Arm::from(3usize);
/// let by_label = Arm::from("control");
/// assert_ne!(by_index, by_label);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arm {
    /// Numeric arm
    Index(usize),
    /// Labelled arm
    Label(String),
}

impl Arm {
    /// Builds `n` index arms `0..n`.
    pub fn indices(n: usize) -> Vec<Arm> {
        (0..n).map(Arm::Index).collect()
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::Index(i) => write!(f, "#{}", i),
            Arm::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<usize> for Arm {
    fn from(value: usize) -> Self {
        Arm::Index(value)
    }
}

impl From<u32> for Arm {
    fn from(value: u32) -> Self {
        Arm::Index(value as usize)
    }
}

impl From<String> for Arm {
    fn from(value: String) -> Self {
        Arm::Label(value)
    }
}

impl From<&str> for Arm {
    fn from(value: &str) -> Self {
        Arm::Label(value.to_string())
    }
}

impl From<&String> for Arm {
    fn from(value: &String) -> Self {
        Arm::Label(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_creation() {
        assert_eq!(Arm::from(2usize), Arm::from(2u32));
        assert_eq!(Arm::from("a"), Arm::from(String::from("a")));
        assert_ne!(Arm::from(0usize), Arm::from("0"));
    }

    #[test]
    fn test_arm_hash() {
        use std::collections::HashSet;

        let set: HashSet<Arm> = [Arm::from(1usize), Arm::from("b")].into_iter().collect();
        assert!(set.contains(&Arm::Index(1)));
        assert!(set.contains(&Arm::Label("b".into())));
        assert!(!set.contains(&Arm::Index(2)));
    }

    #[test]
    fn test_arm_indices() {
        assert_eq!(
            Arm::indices(3),
            vec![Arm::Index(0), Arm::Index(1), Arm::Index(2)]
        );
    }

    #[test]
    fn test_arm_display() {
        assert_eq!(Arm::from(4usize).to_string(), "#4");
        assert_eq!(Arm::from("greedy").to_string(), "greedy");
    }
}
