use shared::models::Member;

/// Case-insensitive match on name, or substring match on mobile.
///
/// A blank query matches everyone. Input order is preserved.
pub fn search_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return members.iter().collect();
    }

    members
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&term) || m.mobile.contains(&term))
        .collect()
}
