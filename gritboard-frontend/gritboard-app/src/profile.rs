use gritboard_api_types::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileField {
    pub label: String,
    pub value: String,
}

impl ProfileField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

const MISSING: &str = "-";

/// Text fields shown in the profile section. Scalar attributes follow the fixed fields.
pub fn profile_fields(user: &UserProfile) -> Vec<ProfileField> {
    let mut fields = vec![
        ProfileField::new("User", &user.login),
        ProfileField::new("Name", user.display_name()),
        ProfileField::new("Campus", user.campus.as_deref().unwrap_or(MISSING)),
        ProfileField::new(
            "Audit ratio",
            user.audit_ratio
                .filter(|ratio| ratio.is_finite())
                .map(|ratio| format!("{ratio:.2}"))
                .unwrap_or_else(|| MISSING.to_string()),
        ),
    ];
    if let Some(attrs) = &user.attrs {
        fields.extend(attrs.iter().filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some(ProfileField::new(key, value))
        }));
    }
    fields
}
