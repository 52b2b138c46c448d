//! Route template expansion for the REST transport

use std::collections::BTreeMap;

use jobwire_core::UrlBuilder;
use jobwire_domain::{JobWireError, Result};
use url::Url;

/// Expands `{name}` placeholders and joins the path onto the base URL.
///
/// Values are percent-encoded as single path segments. Variables without a
/// matching placeholder are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathTemplateUrlBuilder;

impl UrlBuilder for PathTemplateUrlBuilder {
    fn build(
        &self,
        base: &str,
        template: &str,
        vars: &BTreeMap<String, String>,
    ) -> Result<String> {
        let mut path = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                JobWireError::InvalidInput(format!("Unterminated placeholder in route: {template}"))
            })?;
            let name = &after[..end];
            let value = vars.get(name).ok_or_else(|| {
                JobWireError::InvalidInput(format!("Missing value for path variable '{name}'"))
            })?;
            path.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }
        path.push_str(rest);

        let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
        Url::parse(&joined)
            .map_err(|e| JobWireError::InvalidInput(format!("Invalid URL '{joined}': {e}")))?;

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn substitutes_and_joins() {
        let url = PathTemplateUrlBuilder
            .build("http://host:8080/rest/", "server/jobs/{jobId}/data", &vars(&[("jobId", "42")]))
            .unwrap();
        assert_eq!(url, "http://host:8080/rest/server/jobs/42/data");
    }

    #[test]
    fn encodes_values_as_path_segments() {
        let url = PathTemplateUrlBuilder
            .build("http://host", "server/jobs/keys/{key}", &vars(&[("key", "order 7/a")]))
            .unwrap();
        assert_eq!(url, "http://host/server/jobs/keys/order%207%2Fa");
    }

    #[test]
    fn ignores_unused_variables() {
        let url = PathTemplateUrlBuilder
            .build("http://host", "server/jobs", &vars(&[("containerId", "c1")]))
            .unwrap();
        assert_eq!(url, "http://host/server/jobs");
    }

    #[test]
    fn missing_variable_is_invalid_input() {
        let err = PathTemplateUrlBuilder
            .build("http://host", "server/jobs/{jobId}", &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, JobWireError::InvalidInput(msg) if msg.contains("jobId")));
    }

    #[test]
    fn rejects_unparseable_base() {
        let err = PathTemplateUrlBuilder.build("not a url", "server/jobs", &BTreeMap::new());
        assert!(matches!(err, Err(JobWireError::InvalidInput(_))));
    }
}
