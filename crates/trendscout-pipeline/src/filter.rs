//! Admission filter: the ordered predicate chain deciding keep/reject.
//!
//! [`admit`] is a pure function of the candidate and its category's
//! [`FilterConfig`]; the only output beyond the decision is the
//! [`RejectReason`] code, which downstream audit logging records verbatim.
//! The chain short-circuits on the first failing predicate.

use trendscout_core::{Candidate, FilterConfig, TargetScript};

/// Why a candidate was rejected. The string codes are part of the
/// observable contract and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    DurationShort,
    DurationLong,
    NonNativeTitle,
    BlacklistChannel,
    BlacklistKeyword,
    NoMandatoryPhrase,
    AmbiguousWithoutCore,
}

impl RejectReason {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::DurationShort => "duration_short",
            RejectReason::DurationLong => "duration_long",
            RejectReason::NonNativeTitle => "non_native_title",
            RejectReason::BlacklistChannel => "blacklist_channel",
            RejectReason::BlacklistKeyword => "blacklist_keyword",
            RejectReason::NoMandatoryPhrase => "no_mandatory_phrase",
            RejectReason::AmbiguousWithoutCore => "ambiguous_without_core",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Applies the admission chain to one candidate.
///
/// # Errors
///
/// Returns the [`RejectReason`] of the first failing predicate. This is a
/// decision, not a fault; callers log it and move on.
pub fn admit(candidate: &Candidate, config: &FilterConfig) -> Result<(), RejectReason> {
    if candidate.duration_secs < config.min_duration_secs {
        return Err(RejectReason::DurationShort);
    }
    if candidate.duration_secs > config.max_duration_secs {
        return Err(RejectReason::DurationLong);
    }

    if !has_target_script(&candidate.title, config.script) {
        return Err(RejectReason::NonNativeTitle);
    }

    let channel_lower = candidate.channel.to_lowercase();
    if config
        .channel_blacklist
        .iter()
        .any(|b| channel_lower.contains(&b.to_lowercase()))
    {
        return Err(RejectReason::BlacklistChannel);
    }

    let title_lower = candidate.title.to_lowercase();
    let tags_lower = candidate.tags.join(" ").to_lowercase();
    if config.exclude_keywords.iter().any(|k| {
        let k = k.to_lowercase();
        title_lower.contains(&k) || tags_lower.contains(&k)
    }) {
        return Err(RejectReason::BlacklistKeyword);
    }

    // Mandatory-phrase matching is normalized (case-fold, strip whitespace
    // and punctuation) so "오디오북" matches "[오디오북] ..." and tag spellings.
    if !config.mandatory_phrases.is_empty() {
        let norm_title = normalize(&candidate.title);
        let norm_tags = normalize(&candidate.tags.join(" "));
        let hit = config.mandatory_phrases.iter().any(|p| {
            let p = normalize(p);
            !p.is_empty() && (norm_title.contains(&p) || norm_tags.contains(&p))
        });
        if !hit {
            return Err(RejectReason::NoMandatoryPhrase);
        }
    }

    if let Some(rule) = &config.disambiguation {
        let ambiguous_hit = rule
            .ambiguous
            .iter()
            .any(|t| title_lower.contains(&t.to_lowercase()));
        if ambiguous_hit {
            let core_hit = rule
                .core
                .iter()
                .any(|t| title_lower.contains(&t.to_lowercase()));
            if !core_hit {
                return Err(RejectReason::AmbiguousWithoutCore);
            }
        }
    }

    Ok(())
}

/// Language heuristic: the title must contain at least one character from
/// the category's target script.
fn has_target_script(title: &str, script: TargetScript) -> bool {
    match script {
        TargetScript::Any => true,
        TargetScript::Hangul => title.chars().any(|c| ('가'..='힣').contains(&c)),
    }
}

/// Case-folds and strips whitespace plus common punctuation, so phrase
/// matching survives decorative titles.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !is_stripped_punct(*c))
        .collect()
}

fn is_stripped_punct(c: char) -> bool {
    c.is_ascii_punctuation() || "…【】『』〈〉《》「」·•—–‘’“”".contains(c)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
