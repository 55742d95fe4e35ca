// src/model.rs
//
// Wire records from the backend plus the column model used by the table.
// The backend is loose about types (ids as numbers or strings, ranks as
// "#12", proficiencies as numbers or "85%"), so deserialization is lenient.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, de::Error as _};

/// Search result row; also the payload of the selection event.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SchoolSummary {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub state: Option<String>,
}

impl SchoolSummary {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed school)")
    }

    /// `"Name - City, ST"`, or just the name when either part is missing.
    pub fn label(&self) -> String {
        match (nonempty(&self.city), nonempty(&self.state)) {
            (Some(city), Some(state)) => format!("{} - {city}, {state}", self.name()),
            _ => s!(self.name()),
        }
    }

    /// `"City, ST"` subline for the option list.
    pub fn locality(&self) -> Option<String> {
        match (nonempty(&self.city), nonempty(&self.state)) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            _ => None,
        }
    }
}

/// School detail from `/schools/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct School {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub grades: Option<String>,
    #[serde(default, deserialize_with = "de_opt_rank")]
    pub national_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub medal_awarded: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub students: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub teachers: Option<String>,

    /// Filled in locally once the address has been geocoded.
    #[serde(skip)]
    pub location: Option<Coordinates>,
}

impl School {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed school)")
    }

    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One year of ranking history.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RankingRecord {
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    #[serde(deserialize_with = "de_rank")]
    pub national_rank: u32,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub math_proficiency: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub reading_proficiency: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub student_teacher_ratio: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub college_readiness: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub college_readiness_index: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub grades: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub teachers: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub students: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub medal_awarded: Option<String>,
}

/* ---------- table columns ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RankingField {
    Year,
    NationalRank,
    MathProficiency,
    ReadingProficiency,
    StudentTeacherRatio,
    CollegeReadiness,
    CollegeReadinessIndex,
    Grades,
    Teachers,
    Students,
    MedalAwarded,
}

impl RankingField {
    /// Display order of the table columns.
    pub const ALL: [RankingField; 11] = [
        RankingField::Year,
        RankingField::NationalRank,
        RankingField::MathProficiency,
        RankingField::ReadingProficiency,
        RankingField::StudentTeacherRatio,
        RankingField::CollegeReadiness,
        RankingField::CollegeReadinessIndex,
        RankingField::Grades,
        RankingField::Teachers,
        RankingField::Students,
        RankingField::MedalAwarded,
    ];

    pub fn label(self) -> &'static str {
        use RankingField::*;
        match self {
            Year => "YEAR",
            NationalRank => "NATIONAL RANK",
            MathProficiency => "MATH PROFICIENCY",
            ReadingProficiency => "READING PROFICIENCY",
            StudentTeacherRatio => "STUDENT TEACHER RATIO",
            CollegeReadiness => "COLLEGE READINESS",
            CollegeReadinessIndex => "COLLEGE READINESS INDEX",
            Grades => "GRADES",
            Teachers => "TEACHERS",
            Students => "STUDENTS",
            MedalAwarded => "MEDAL",
        }
    }

    pub fn value(self, r: &RankingRecord) -> FieldValue<'_> {
        use RankingField::*;
        fn cell(v: &Option<String>) -> FieldValue<'_> {
            v.as_deref().map_or(FieldValue::Missing, FieldValue::from_text)
        }
        match self {
            Year => FieldValue::Int(r.year as i64),
            NationalRank => FieldValue::Int(r.national_rank as i64),
            MathProficiency => cell(&r.math_proficiency),
            ReadingProficiency => cell(&r.reading_proficiency),
            StudentTeacherRatio => cell(&r.student_teacher_ratio),
            CollegeReadiness => cell(&r.college_readiness),
            CollegeReadinessIndex => cell(&r.college_readiness_index),
            Grades => cell(&r.grades),
            Teachers => cell(&r.teachers),
            Students => cell(&r.students),
            MedalAwarded => cell(&r.medal_awarded),
        }
    }
}

/// Typed cell value. Ordering: missing first, then numbers by value,
/// then text lexicographically.
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Missing,
    Int(i64),
    /// Numeric cell; keeps the text as received for display.
    Num(f64, &'a str),
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    /// `"85"` / `"4.5"` are numbers; `"85%"` / `"Gold"` stay text.
    pub fn from_text(s: &'a str) -> Self {
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => FieldValue::Num(v, s),
            _ => FieldValue::Text(s),
        }
    }

    fn kind(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Int(_) | FieldValue::Num(..) => 1,
            FieldValue::Text(_) => 2,
        }
    }

    pub fn is_number(&self) -> bool {
        self.kind() == 1
    }

    fn number(&self) -> Option<f64> {
        match *self {
            FieldValue::Int(v) => Some(v as f64),
            FieldValue::Num(v, _) => Some(v),
            _ => None,
        }
    }
}

impl Ord for FieldValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind().cmp(&other.kind()).then_with(|| match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        })
    }
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue<'_> {}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => Ok(()),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Num(_, s) | FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/* ---------- lenient deserializers ---------- */

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Bool(v) => v.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

fn nonempty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Int(v) => Ok(v.to_string()),
        Scalar::Text(s) => Ok(s),
        _ => Err(D::Error::custom("school id must be a string or integer")),
    }
}

fn de_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?.map(Scalar::into_text))
}

/// `"#123"` / `"123"` / `123`
pub fn parse_rank(s: &str) -> Option<u32> {
    s.trim().trim_start_matches('#').trim().parse().ok()
}

/// `2021` / `"2021"` / `"2021-09-01"`
pub fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    s.parse().ok().or_else(|| {
        let (y, rest) = s.split_once('-')?;
        (y.len() == 4 && !rest.is_empty()).then(|| y.parse().ok()).flatten()
    })
}

fn de_rank<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Int(v) => u32::try_from(v).map_err(D::Error::custom),
        Scalar::Text(s) => {
            parse_rank(&s).ok_or_else(|| D::Error::custom(format!("invalid rank {s:?}")))
        }
        _ => Err(D::Error::custom("national_rank must be an integer")),
    }
}

fn de_opt_rank<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    match Option::<Scalar>::deserialize(d)? {
        None => Ok(None),
        Some(Scalar::Int(v)) => u32::try_from(v).map(Some).map_err(D::Error::custom),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Text(s)) => parse_rank(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid rank {s:?}"))),
        Some(_) => Err(D::Error::custom("national_rank must be an integer")),
    }
}

fn de_year<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Int(v) => i32::try_from(v).map_err(D::Error::custom),
        Scalar::Text(s) => {
            parse_year(&s).ok_or_else(|| D::Error::custom(format!("invalid year {s:?}")))
        }
        _ => Err(D::Error::custom("year must be an integer")),
    }
}
