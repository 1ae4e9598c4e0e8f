use crate::models::Role;

/// infer_role
///
/// Guesses a role from an email-like string by looking at its domain part.
/// This is a classification aid for registration screens; the login flow never uses it
/// because login does not pre-select a role.
///
/// The domain (everything after the first `@`, lowercased) is tested against student,
/// lecturer and admin markers in that order. Input without `@`, or a domain with no
/// marker, falls back to `Role::Student`.
pub fn infer_role(email_like: &str) -> Role {
    let Some((_, domain)) = email_like.split_once('@') else {
        return Role::Student;
    };
    let domain = domain.to_lowercase();

    if has_marker(&domain, &["student", "learner"], "s.") {
        Role::Student
    } else if has_marker(&domain, &["lecturer", "faculty", "teacher"], "l.") {
        Role::Lecturer
    } else if has_marker(&domain, &["admin", "staff"], "a.") {
        Role::Admin
    } else {
        Role::Student
    }
}

fn has_marker(domain: &str, needles: &[&str], prefix: &str) -> bool {
    needles.iter().any(|n| domain.contains(n)) || domain.starts_with(prefix)
}
