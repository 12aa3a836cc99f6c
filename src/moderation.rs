//! Forbidden-word filter applied to guild messages.

use poise::serenity_prelude::RoleId;

use crate::state::GuildConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Guild has no forbidden word list
    NotConfigured,
    /// Sender holds the bypass role
    Bypassed,
    Clean,
    /// First configured word found in the message
    Flagged { word: String },
}

impl FilterVerdict {
    pub fn is_flagged(&self) -> bool {
        matches!(self, FilterVerdict::Flagged { .. })
    }
}

/// Case-insensitive substring check of `content` against the guild's list
pub fn check_message(
    config: Option<&GuildConfig>,
    content: &str,
    sender_roles: &[RoleId],
) -> FilterVerdict {
    let Some(config) = config else {
        return FilterVerdict::NotConfigured;
    };
    let Some(words) = config.bad_words.as_ref() else {
        return FilterVerdict::NotConfigured;
    };

    if let Some(bypass) = config.bypass_role_id() {
        if sender_roles.contains(&bypass) {
            return FilterVerdict::Bypassed;
        }
    }

    let content = content.to_lowercase();
    words
        .iter()
        .filter(|word| !word.is_empty())
        .find(|word| content.contains(word.as_str()))
        .map(|word| FilterVerdict::Flagged { word: word.clone() })
        .unwrap_or(FilterVerdict::Clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(words: &[&str], bypass: Option<&str>) -> GuildConfig {
        GuildConfig {
            bad_words: Some(words.iter().map(|w| w.to_string()).collect()),
            ticket_roles: vec![],
            bypass_role: bypass.map(String::from),
        }
    }

    #[test]
    fn test_flags_case_insensitive_substring() {
        let config = config(&["darn"], None);
        assert_eq!(
            check_message(Some(&config), "Well DARNIT all", &[]),
            FilterVerdict::Flagged {
                word: "darn".to_string()
            }
        );
        assert_eq!(check_message(Some(&config), "all good", &[]), FilterVerdict::Clean);
    }

    #[test]
    fn test_first_configured_word_is_reported() {
        let config = config(&["beta", "alpha"], None);
        assert_eq!(
            check_message(Some(&config), "alpha beta", &[]),
            FilterVerdict::Flagged {
                word: "beta".to_string()
            }
        );
    }

    #[test]
    fn test_bypass_role_holder_is_never_flagged() {
        let config = config(&["darn"], Some("42"));
        let verdict = check_message(Some(&config), "darn", &[RoleId::new(7), RoleId::new(42)]);
        assert_eq!(verdict, FilterVerdict::Bypassed);
        assert!(!verdict.is_flagged());

        // Someone without the role is still caught
        assert!(check_message(Some(&config), "darn", &[RoleId::new(7)]).is_flagged());
    }

    #[test]
    fn test_missing_configuration() {
        assert_eq!(check_message(None, "darn", &[]), FilterVerdict::NotConfigured);

        let no_words = GuildConfig {
            bypass_role: Some("42".into()),
            ..GuildConfig::default()
        };
        assert_eq!(
            check_message(Some(&no_words), "darn", &[]),
            FilterVerdict::NotConfigured
        );
    }
}
