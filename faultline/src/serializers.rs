pub(crate) mod status_code_map {
    use std::collections::HashMap;

    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::StatusCode;

    pub(crate) fn serialize<S>(
        pages: &HashMap<StatusCode, String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entries: Vec<_> = pages.iter().collect();
        entries.sort_by_key(|(status_code, _)| **status_code);

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (status_code, url) in entries {
            map.serialize_entry(status_code.as_str(), url)?;
        }
        map.end()
    }

    pub(crate) fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<HashMap<StatusCode, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        HashMap::<String, String>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, url)| {
                parse_status_code(&key).map(|status_code| (status_code, url)).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "invalid HTTP status code `{key}`; expected a number between 100 and 599"
                    ))
                })
            })
            .collect()
    }

    fn parse_status_code(key: &str) -> Option<StatusCode> {
        key.trim()
            .parse::<u16>()
            .ok()
            .filter(|code| (100..600).contains(code))
            .and_then(|code| StatusCode::from_u16(code).ok())
    }
}
