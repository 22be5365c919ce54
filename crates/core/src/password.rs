//! Password strength analysis and secure password generation

use std::fmt;

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Punctuation counted as a symbol by the analyzer
pub const ANALYZER_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";
/// Punctuation the generator draws from
pub const GENERATOR_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

pub const MIN_GENERATED_LENGTH: usize = 8;
pub const MAX_GENERATED_LENGTH: usize = 128;
pub const DEFAULT_GENERATED_LENGTH: usize = 16;

/// Passwords shorter than this get a length suggestion
const RECOMMENDED_LENGTH: usize = 12;

/// Strength bucket derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => Strength::Weak,
            30..=59 => Strength::Medium,
            60..=79 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very_strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordAnalysis {
    pub score: u8,
    pub strength: Strength,
    pub length: usize,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_numbers: bool,
    pub has_symbols: bool,
    /// `length * log2(charset size)`, rounded to two decimals
    pub entropy: f64,
    pub suggestions: Vec<String>,
}

/// Score a password.
///
/// Length counts Unicode scalar values. Characters outside the four modeled
/// classes add length but no charset size.
pub fn analyze(password: &str) -> Result<PasswordAnalysis> {
    if password.is_empty() {
        return Err(Error::Validation("Password must not be empty".to_string()));
    }

    let length = password.chars().count();
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_numbers = password.chars().any(|c| c.is_ascii_digit());
    let has_symbols = password.chars().any(|c| ANALYZER_SYMBOLS.contains(c));

    let charset_size = [
        (has_lowercase, 26u32),
        (has_uppercase, 26),
        (has_numbers, 10),
        (has_symbols, 32),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, size)| size)
    .sum::<u32>();

    let entropy = if charset_size > 0 {
        let raw = length as f64 * f64::from(charset_size).log2();
        (raw * 100.0).round() / 100.0
    } else {
        0.0
    };

    let mut score: i64 = (length as i64 * 4).min(40);
    if has_uppercase {
        score += 10;
    }
    if has_lowercase {
        score += 10;
    }
    if has_numbers {
        score += 15;
    }
    if has_symbols {
        score += 25;
    }

    // Repetition penalty: fewer than half the characters are distinct.
    let distinct = password
        .chars()
        .collect::<std::collections::HashSet<_>>()
        .len();
    if distinct * 2 < length {
        score -= 10;
    }

    let score = score.clamp(0, 100) as u8;

    let suggestions = [
        (length < RECOMMENDED_LENGTH, "Increase length to at least 12 characters"),
        (!has_uppercase, "Add uppercase letters"),
        (!has_lowercase, "Add lowercase letters"),
        (!has_numbers, "Add numbers"),
        (!has_symbols, "Add special symbols"),
    ]
    .into_iter()
    .filter(|(applies, _)| *applies)
    .map(|(_, text)| text.to_string())
    .collect();

    Ok(PasswordAnalysis {
        score,
        strength: Strength::from_score(score),
        length,
        has_uppercase,
        has_lowercase,
        has_numbers,
        has_symbols,
        entropy,
        suggestions,
    })
}

/// Which character classes to draw from and how many characters to emit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_GENERATED_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl PasswordOptions {
    /// Union of the selected classes, in lowercase/uppercase/digits/symbols order.
    pub fn charset(&self) -> Vec<char> {
        [
            (self.include_lowercase, LOWERCASE),
            (self.include_uppercase, UPPERCASE),
            (self.include_numbers, DIGITS),
            (self.include_symbols, GENERATOR_SYMBOLS),
        ]
        .into_iter()
        .filter(|(selected, _)| *selected)
        .flat_map(|(_, class)| class.chars())
        .collect()
    }
}

/// A freshly generated password with its analyzer score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPassword {
    pub password: String,
    pub strength_score: u8,
}

/// Draw a password from `rng`.
///
/// Each character is picked independently and uniformly from the selected
/// charset. Nothing forces every selected class to appear.
pub fn generate<R>(options: &PasswordOptions, rng: &mut R) -> Result<String>
where
    R: Rng + CryptoRng + ?Sized,
{
    if !(MIN_GENERATED_LENGTH..=MAX_GENERATED_LENGTH).contains(&options.length) {
        return Err(Error::Validation(format!(
            "Password length must be between {} and {}, got {}",
            MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH, options.length
        )));
    }

    let charset = options.charset();
    if charset.is_empty() {
        return Err(Error::Validation(
            "At least one character type must be selected".to_string(),
        ));
    }

    Ok((0..options.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect())
}

/// Generate a password from the operating system's entropy source and score it.
///
/// This is the one function in the crate that reaches outside the process.
pub fn generate_password(options: &PasswordOptions) -> Result<GeneratedPassword> {
    let password = generate(options, &mut rand::rngs::OsRng)?;
    let strength_score = analyze(&password)?.score;

    Ok(GeneratedPassword {
        password,
        strength_score,
    })
}
