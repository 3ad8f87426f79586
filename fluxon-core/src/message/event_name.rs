/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! Hierarchical event names and the structural wildcard matcher.
//!
//! Event names are `:`-delimited strings (`"navigate:succeeded"`,
//! `"change:state"`). Subscriptions may replace any segment with the wildcard
//! `*`, which matches exactly one concrete segment at that position. Matching is
//! structural over segments, never substring-based, so `"a:*"` matches
//! `"a:b"` but neither `"a"` nor `"a:b:c"`.

use std::fmt;

use crate::message::FluxonError;

/// Segment delimiter for hierarchical event names.
pub const DELIMITER: char = ':';

/// The wildcard segment, matching exactly one concrete segment at its position.
pub const WILDCARD: &str = "*";

/// A validated, non-empty event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName(String);

impl EventName {
    /// Creates a new event name.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, FluxonError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FluxonError::InvalidArgument("missing event name".into()));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the `:`-delimited segments of this name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(DELIMITER)
    }

    /// Whether every segment of this name is concrete (contains no wildcard).
    ///
    /// Only concrete names may be dispatched; wildcards belong in subscriptions.
    pub fn is_concrete(&self) -> bool {
        self.segments().all(|segment| segment != WILDCARD)
    }

    /// Returns `"<self>:<suffix>"` as a new event name.
    ///
    /// Used for action lifecycle names (`"navigate:pending"`) and keyed store
    /// change events (`"change:state"`).
    pub fn suffixed(&self, suffix: &str) -> EventName {
        EventName(format!("{}{}{}", self.0, DELIMITER, suffix))
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One parsed segment of an [`EventPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Literal(String),
    Wildcard,
}

/// A parsed subscription pattern over `:`-delimited segments.
///
/// Patterns are compared structurally: two patterns are equal when their segment
/// lists are equal, which is what
/// [`unsubscribe`](crate::common::EventBus::unsubscribe) keys removal on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventPattern {
    segments: Vec<Segment>,
}

impl EventPattern {
    /// Parses a subscription pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `pattern` is empty.
    pub fn parse(pattern: &str) -> Result<Self, FluxonError> {
        if pattern.is_empty() {
            return Err(FluxonError::InvalidArgument("missing event name".into()));
        }
        let segments = pattern
            .split(DELIMITER)
            .map(|segment| {
                if segment == WILDCARD {
                    Segment::Wildcard
                } else {
                    Segment::Literal(segment.to_string())
                }
            })
            .collect();
        Ok(Self { segments })
    }

    /// Whether this pattern matches the concrete `name`.
    ///
    /// Requires equal segment counts; a [`WILDCARD`] pattern segment matches any
    /// concrete segment at its position.
    pub fn matches(&self, name: &EventName) -> bool {
        let segments: Vec<&str> = name.segments().collect();
        if segments.len() != self.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(segments)
            .all(|(pattern, concrete)| match pattern {
                Segment::Wildcard => true,
                Segment::Literal(literal) => literal == concrete,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &str) -> EventName {
        EventName::new(n).unwrap()
    }

    #[test]
    fn literal_pattern_matches_only_itself() {
        let pattern = EventPattern::parse("a:b").unwrap();
        assert!(pattern.matches(&name("a:b")));
        assert!(!pattern.matches(&name("a:c")));
        assert!(!pattern.matches(&name("a")));
        assert!(!pattern.matches(&name("a:b:c")));
    }

    #[test]
    fn wildcard_matches_exactly_one_segment() {
        let pattern = EventPattern::parse("a:*").unwrap();
        assert!(pattern.matches(&name("a:b")));
        assert!(pattern.matches(&name("a:c")));
        assert!(!pattern.matches(&name("a")));
        assert!(!pattern.matches(&name("a:c:d")));
        assert!(!pattern.matches(&name("b:c")));
    }

    #[test]
    fn wildcard_position_is_significant() {
        let pattern = EventPattern::parse("*:b").unwrap();
        assert!(pattern.matches(&name("a:b")));
        assert!(!pattern.matches(&name("b:a")));
    }

    #[test]
    fn matching_is_structural_not_substring() {
        let pattern = EventPattern::parse("nav").unwrap();
        assert!(!pattern.matches(&name("navigate")));
        assert!(pattern.matches(&name("nav")));
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(EventName::new("").is_err());
        assert!(EventPattern::parse("").is_err());
    }

    #[test]
    fn concreteness_flags_wildcard_segments() {
        assert!(name("a:b").is_concrete());
        assert!(!name("a:*").is_concrete());
        // an asterisk embedded in a longer segment is a literal, not a wildcard
        assert!(name("a*b").is_concrete());
    }

    #[test]
    fn suffixing_appends_one_segment() {
        assert_eq!(name("navigate").suffixed("pending").as_str(), "navigate:pending");
    }
}
