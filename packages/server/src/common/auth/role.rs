use crate::common::vocabulary::text_enum;

text_enum! {
    /// Office a user holds in the group. Stored in `users.role`.
    pub enum Role as "role" {
        Admin => ("admin", "Admin"),
        Chairperson => ("chairperson", "Chairperson"),
        /// Generic committee seat without a dedicated office.
        Committee => ("committee", "Committee"),
        Treasurer => ("treasurer", "Treasurer"),
        Secretary => ("secretary", "Secretary"),
        Coordinator => ("coordinator", "Coordinator"),
        /// Welfare officer.
        Welfare => ("welfare", "Welfare"),
        Member => ("member", "Member"),
    }
}

impl Role {
    /// Office holders with reporting access beyond a plain member. Admin is an
    /// operator account, not an office, and is excluded.
    pub fn is_committee(&self) -> bool {
        !matches!(self, Role::Member | Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committee_roles() {
        let committee: Vec<Role> = Role::ALL
            .iter()
            .copied()
            .filter(Role::is_committee)
            .collect();
        assert_eq!(
            committee,
            vec![
                Role::Chairperson,
                Role::Committee,
                Role::Treasurer,
                Role::Secretary,
                Role::Coordinator,
                Role::Welfare,
            ]
        );
    }

    #[test]
    fn test_default_is_member() {
        assert_eq!(Role::default(), Role::Member);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Treasurer".parse::<Role>().is_err());
        assert_eq!("treasurer".parse::<Role>().unwrap(), Role::Treasurer);
    }
}
