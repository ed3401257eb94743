use std::{collections::HashMap, fmt};

use crate::{
    error::{Error, Result},
    types::{AudioFeatures, SavedTrack, Track},
};

/// A numeric attribute a bound can be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    ReleaseYear,
    Acousticness,
    Danceability,
    DurationMs,
    Energy,
    Instrumentalness,
    Key,
    Liveness,
    Loudness,
    Speechiness,
    Tempo,
    TimeSignature,
    Valence,
}

impl Attribute {
    pub const AUDIO_FEATURES: [Attribute; 12] = [
        Attribute::Acousticness,
        Attribute::Danceability,
        Attribute::DurationMs,
        Attribute::Energy,
        Attribute::Instrumentalness,
        Attribute::Key,
        Attribute::Liveness,
        Attribute::Loudness,
        Attribute::Speechiness,
        Attribute::Tempo,
        Attribute::TimeSignature,
        Attribute::Valence,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::ReleaseYear => "release_year",
            Attribute::Acousticness => "acousticness",
            Attribute::Danceability => "danceability",
            Attribute::DurationMs => "duration_ms",
            Attribute::Energy => "energy",
            Attribute::Instrumentalness => "instrumentalness",
            Attribute::Key => "key",
            Attribute::Liveness => "liveness",
            Attribute::Loudness => "loudness",
            Attribute::Speechiness => "speechiness",
            Attribute::Tempo => "tempo",
            Attribute::TimeSignature => "time_signature",
            Attribute::Valence => "valence",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundKind::Min => f.write_str("min"),
            BoundKind::Max => f.write_str("max"),
        }
    }
}

/// Inclusive limit on one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub kind: BoundKind,
    pub attribute: Attribute,
    pub threshold: f64,
}

impl Bound {
    pub fn min(attribute: Attribute, threshold: f64) -> Self {
        Self {
            kind: BoundKind::Min,
            attribute,
            threshold,
        }
    }

    pub fn max(attribute: Attribute, threshold: f64) -> Self {
        Self {
            kind: BoundKind::Max,
            attribute,
            threshold,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}:{}", self.kind, self.attribute, self.threshold)
    }
}

/// Why an item did not make it into the destination.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    /// The item carries no value for an attribute a bound refers to.
    Missing(Attribute),
    /// The raw value could not be turned into a number.
    Unparsable { attribute: Attribute, raw: String },
    /// The service returned no feature record for the track.
    NoRecord,
    /// The track has no catalog id and cannot be written anywhere.
    NoIdentifier,
    BelowMin {
        attribute: Attribute,
        value: f64,
        threshold: f64,
    },
    AboveMax {
        attribute: Attribute,
        value: f64,
        threshold: f64,
    },
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Missing(attribute) => write!(f, "no {} value", attribute),
            Exclusion::Unparsable { attribute, raw } => {
                write!(f, "cannot read {} from {:?}", attribute, raw)
            }
            Exclusion::NoRecord => f.write_str("no audio features available"),
            Exclusion::NoIdentifier => f.write_str("track has no id"),
            Exclusion::BelowMin {
                attribute,
                value,
                threshold,
            } => write!(f, "{} {} is below {}", attribute, value, threshold),
            Exclusion::AboveMax {
                attribute,
                value,
                threshold,
            } => write!(f, "{} {} is above {}", attribute, value, threshold),
        }
    }
}

/// Outcome of reading one attribute from an item.
pub type Extracted = std::result::Result<f64, Exclusion>;

/// Anything the predicate engine can read named numeric attributes from.
pub trait Attributed {
    fn attribute(&self, attribute: Attribute) -> Extracted;
}

impl Attributed for HashMap<Attribute, f64> {
    fn attribute(&self, attribute: Attribute) -> Extracted {
        self.get(&attribute)
            .copied()
            .ok_or(Exclusion::Missing(attribute))
    }
}

impl Attributed for Track {
    fn attribute(&self, attribute: Attribute) -> Extracted {
        if attribute != Attribute::ReleaseYear {
            return Err(Exclusion::Missing(attribute));
        }

        let raw = self
            .album
            .as_ref()
            .and_then(|album| album.release_date.as_deref())
            .ok_or(Exclusion::Missing(attribute))?;

        extract_year(raw).map(f64::from)
    }
}

impl Attributed for SavedTrack {
    fn attribute(&self, attribute: Attribute) -> Extracted {
        self.track.attribute(attribute)
    }
}

impl Attributed for AudioFeatures {
    fn attribute(&self, attribute: Attribute) -> Extracted {
        let value = match attribute {
            Attribute::ReleaseYear => None,
            Attribute::Acousticness => self.acousticness,
            Attribute::Danceability => self.danceability,
            Attribute::DurationMs => self.duration_ms,
            Attribute::Energy => self.energy,
            Attribute::Instrumentalness => self.instrumentalness,
            Attribute::Key => self.key,
            Attribute::Liveness => self.liveness,
            Attribute::Loudness => self.loudness,
            Attribute::Speechiness => self.speechiness,
            Attribute::Tempo => self.tempo,
            Attribute::TimeSignature => self.time_signature,
            Attribute::Valence => self.valence,
        };

        value.ok_or(Exclusion::Missing(attribute))
    }
}

/// Reads the year out of a release date with year, month or day precision
/// (`2020`, `2020-05`, `2020-05-01`).
pub fn extract_year(raw: &str) -> std::result::Result<i32, Exclusion> {
    raw.split('-')
        .next()
        .map(str::trim)
        .filter(|year| !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()))
        .and_then(|year| year.parse::<i32>().ok())
        .ok_or_else(|| Exclusion::Unparsable {
            attribute: Attribute::ReleaseYear,
            raw: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Include,
    Exclude(Exclusion),
}

impl Verdict {
    pub fn is_include(&self) -> bool {
        matches!(self, Verdict::Include)
    }
}

/// A set of inclusive min/max bounds.
///
/// Built once from validated input. Whether a min lies below its max is up
/// to the caller; an attribute without bounds is unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    bounds: Vec<Bound>,
}

impl FilterSpec {
    /// Filter for pipelines that select items; at least one bound is required
    /// and every threshold must be finite.
    pub fn new(bounds: Vec<Bound>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::Configuration("No filters specified.".to_string()));
        }
        // NaN compares false both ways and would let every item through.
        if let Some(bound) = bounds.iter().find(|b| !b.threshold.is_finite()) {
            return Err(Error::Configuration(format!(
                "Threshold of {}_{} must be a finite number, got {}.",
                bound.kind, bound.attribute, bound.threshold
            )));
        }
        Ok(Self { bounds })
    }

    /// The identity filter: accepts every item.
    pub fn unconstrained() -> Self {
        Self { bounds: Vec::new() }
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    pub fn is_unconstrained(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Checks every bound in order and reports the first one that fails.
    pub fn evaluate<I: Attributed + ?Sized>(&self, item: &I) -> Verdict {
        for bound in &self.bounds {
            let value = match item.attribute(bound.attribute) {
                Ok(value) => value,
                Err(exclusion) => return Verdict::Exclude(exclusion),
            };

            match bound.kind {
                BoundKind::Min if value < bound.threshold => {
                    return Verdict::Exclude(Exclusion::BelowMin {
                        attribute: bound.attribute,
                        value,
                        threshold: bound.threshold,
                    });
                }
                BoundKind::Max if value > bound.threshold => {
                    return Verdict::Exclude(Exclusion::AboveMax {
                        attribute: bound.attribute,
                        value,
                        threshold: bound.threshold,
                    });
                }
                _ => {}
            }
        }

        Verdict::Include
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .bounds
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&rendered)
    }
}

/// True iff the item satisfies every bound of the filter.
pub fn should_include<I: Attributed + ?Sized>(item: &I, filter: &FilterSpec) -> bool {
    filter.evaluate(item).is_include()
}

