//! Access decision engine.
//!
//! Evaluation is a pure function of the request and the caller's resolved
//! privilege facts: OR across facts, AND across the four dimensions of one
//! fact (namespace, method, path, object id). Any single matching fact grants
//! access; there are no deny rules.

use rbac_authority_sdk::{AccessPrivilege, AccessRequest};
use regex::Regex;

/// Anchored match: the whole candidate must match the pattern, not a
/// substring. `"/user-service/v1/.*"` matches `"/user-service/v1/x"` but not
/// `"/user-service/v1"`.
///
/// A pattern that fails to compile makes this single check non-matching;
/// evaluation of the remaining facts continues (fail-closed per fact).
pub(crate) fn full_match(pattern: &str, candidate: &str) -> bool {
    let anchored = format!("^(?:{pattern})$");
    match Regex::new(&anchored) {
        Ok(re) => re.is_match(candidate),
        Err(error) => {
            tracing::warn!(pattern, %error, "skipping grant with malformed pattern");
            false
        }
    }
}

/// Decide whether `request` is authorized by any of `facts`.
///
/// Stops at the first matching fact; with zero facts the answer is `false`.
#[must_use]
pub fn decide(request: &AccessRequest, facts: &[AccessPrivilege]) -> bool {
    facts.iter().any(|fact| {
        fact.namespace_id == request.namespace_id
            && full_match(&fact.method, &request.method)
            && full_match(&fact.path_regex, &request.path)
            && full_match(&fact.object_id_regex, &request.object_id)
    })
}

#[cfg(test)]
mod tests {
    use super::{decide, full_match};
    use rbac_authority_sdk::{AccessPrivilege, AccessRequest};
    use uuid::Uuid;

    fn fact(namespace_id: Uuid) -> AccessPrivilege {
        AccessPrivilege {
            user_id: Uuid::new_v4(),
            user_name: "alice".to_owned(),
            namespace_id,
            namespace_name: "ns".to_owned(),
            user_group_id: Uuid::new_v4(),
            user_group_name: "group".to_owned(),
            role_id: Uuid::new_v4(),
            role_name: "role".to_owned(),
            path_id: Uuid::new_v4(),
            path_regex: "/user-service/v1/.*".to_owned(),
            method: "(GET|POST)".to_owned(),
            target_group_id: Uuid::new_v4(),
            target_group_name: "targets".to_owned(),
            target_id: Uuid::new_v4(),
            object_id_regex: "object-id-[1-3]".to_owned(),
        }
    }

    fn request(namespace_id: Uuid, method: &str, path: &str, object_id: &str) -> AccessRequest {
        AccessRequest {
            user_id: Uuid::new_v4(),
            namespace_id,
            path: path.to_owned(),
            method: method.to_owned(),
            object_id: object_id.to_owned(),
        }
    }

    #[test]
    fn grant_matching_on_all_dimensions_allows() {
        let ns = Uuid::new_v4();
        let facts = vec![fact(ns)];
        assert!(decide(
            &request(ns, "GET", "/user-service/v1/", "object-id-1"),
            &facts
        ));
        assert!(decide(
            &request(ns, "POST", "/user-service/v1/anything", "object-id-3"),
            &facts
        ));
    }

    #[test]
    fn method_outside_alternation_denies() {
        let ns = Uuid::new_v4();
        assert!(!decide(
            &request(ns, "DELETE", "/user-service/v1/", "object-id-1"),
            &[fact(ns)]
        ));
    }

    #[test]
    fn path_not_matching_denies() {
        let ns = Uuid::new_v4();
        assert!(!decide(
            &request(ns, "GET", "/user-service/v2/", "object-id-1"),
            &[fact(ns)]
        ));
    }

    #[test]
    fn object_id_outside_range_denies() {
        let ns = Uuid::new_v4();
        assert!(!decide(
            &request(ns, "GET", "/user-service/v1/", "object-id-4"),
            &[fact(ns)]
        ));
    }

    #[test]
    fn namespace_mismatch_denies_even_when_patterns_match() {
        let granted = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!decide(
            &request(other, "GET", "/user-service/v1/", "object-id-1"),
            &[fact(granted)]
        ));
    }

    #[test]
    fn empty_fact_set_denies() {
        let ns = Uuid::new_v4();
        assert!(!decide(&request(ns, "GET", "/x", "y"), &[]));
    }

    #[test]
    fn adding_a_fact_never_revokes_access() {
        let ns = Uuid::new_v4();
        let req = request(ns, "GET", "/user-service/v1/", "object-id-1");

        let mut facts = vec![fact(ns)];
        assert!(decide(&req, &facts));

        // OR-composition: extra non-matching facts cannot flip true to false.
        let mut unrelated = fact(ns);
        unrelated.method = "DELETE".to_owned();
        facts.push(unrelated);
        facts.push(fact(Uuid::new_v4()));
        assert!(decide(&req, &facts));
    }

    #[test]
    fn malformed_pattern_skips_that_fact_only() {
        let ns = Uuid::new_v4();
        let mut broken = fact(ns);
        broken.path_regex = "(".to_owned();

        let req = request(ns, "GET", "/user-service/v1/", "object-id-1");
        assert!(!decide(&req, &[broken.clone()]));

        // A later valid fact still grants access.
        assert!(decide(&req, &[broken, fact(ns)]));
    }

    #[test]
    fn match_is_anchored_not_substring() {
        assert!(full_match("/user-service/v1/.*", "/user-service/v1/anything"));
        assert!(!full_match("/user-service/v1/.*", "/user-service/v1"));
        assert!(!full_match(
            "/user-service/v1/.*",
            "prefix/user-service/v1/x"
        ));
        assert!(full_match("object-id-[1-3]", "object-id-2"));
        assert!(!full_match("object-id-[1-3]", "object-id-12"));
        assert!(full_match("GET", "GET"));
        assert!(!full_match("GET", "GETX"));
    }
}
