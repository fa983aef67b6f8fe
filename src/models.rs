use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    #[serde(deserialize_with = "lax_age")]
    pub age: i64,
    pub track: String,
}

impl Record {
    pub fn new(name: &str, age: i64, track: &str) -> Self {
        Record {
            name: name.to_string(),
            age,
            track: track.to_string(),
        }
    }

    /// Overwrites only the fields the patch supplies.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(track) = patch.track {
            self.track = track;
        }
    }
}

/// Partial record for `PATCH`. Absent and `null` fields are both "not supplied":
/// unlike a merge of the raw JSON object, a `null` never overwrites a stored
/// field, so records stay fully typed.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lax_age_opt")]
    pub age: Option<i64>,
    #[serde(default)]
    pub track: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.track.is_none()
    }
}

// Lax integer decoding: 25, 25.0, "25", "25.0" and true/false (1/0) are all
// accepted; fractional values and non-numeric text are not.
#[derive(Deserialize)]
#[serde(untagged)]
enum LaxInt {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

impl LaxInt {
    fn into_int<E: de::Error>(self) -> Result<i64, E> {
        match self {
            LaxInt::Int(n) => Ok(n),
            LaxInt::Bool(b) => Ok(i64::from(b)),
            LaxInt::Float(f) => integral(f).ok_or_else(|| {
                E::custom(format!(
                    "age should be a valid integer, got a number with a fractional part: {f}"
                ))
            }),
            LaxInt::Text(s) => {
                let text = s.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(integral))
                    .ok_or_else(|| {
                        E::custom(format!(
                            "age should be a valid integer, unable to parse string {s:?} as an integer"
                        ))
                    })
            }
        }
    }
}

fn lax_age<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    LaxInt::deserialize(deserializer)?.into_int()
}

fn lax_age_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LaxInt>::deserialize(deserializer)?
        .map(LaxInt::into_int::<D::Error>)
        .transpose()
}

#[derive(Serialize, Debug)]
pub struct Welcome {
    #[serde(rename = "Message")]
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct DataResponse<'a> {
    #[serde(rename = "Message")]
    pub message: &'static str,
    #[serde(rename = "Data")]
    pub data: &'a [Record],
}

#[derive(Serialize, Debug)]
pub struct DeletedResponse {
    #[serde(rename = "Message")]
    pub message: &'static str,
    #[serde(rename = "Deleted")]
    pub deleted: Record,
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Serialize, Debug)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<String>,
    pub msg: String,
}

#[derive(Serialize, Debug)]
pub struct ValidationErrorBody {
    pub detail: Vec<ValidationIssue>,
}
