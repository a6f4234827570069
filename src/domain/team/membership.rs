//! Team membership sets and reconciliation planning
//!
//! A team lists its members; every member lists the team back in its own
//! `teams` set. Changing a team's membership is planned as a set difference
//! between the old and new member sets: stale back-references are detached,
//! then every current member is attached. Attaching is an idempotent add, so
//! applying the same plan twice converges to the same state, which is what
//! lets a partially applied edit be repaired by re-running it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::intern::InternId;
use crate::domain::user::UserId;

/// The three member sets of a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default)]
    pub mentors: BTreeSet<UserId>,
    #[serde(default)]
    pub interns: BTreeSet<InternId>,
    #[serde(default)]
    pub panelists: BTreeSet<UserId>,
}

impl Membership {
    pub fn new(
        mentors: impl IntoIterator<Item = UserId>,
        interns: impl IntoIterator<Item = InternId>,
        panelists: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            mentors: mentors.into_iter().collect(),
            interns: interns.into_iter().collect(),
            panelists: panelists.into_iter().collect(),
        }
    }

    /// Staff members of the team: mentors and panelists. A user may be both.
    pub fn staff(&self) -> BTreeSet<UserId> {
        self.mentors.union(&self.panelists).cloned().collect()
    }
}

/// Back-reference writes needed to move a team from one membership to another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipPlan {
    /// Staff that left the team
    pub detach_users: Vec<UserId>,
    /// Interns that left the team
    pub detach_interns: Vec<InternId>,
    /// Every staff member of the new membership
    pub attach_users: Vec<UserId>,
    /// Every intern of the new membership
    pub attach_interns: Vec<InternId>,
}

impl MembershipPlan {
    /// Plan the transition from `old` to `new`
    pub fn between(old: &Membership, new: &Membership) -> Self {
        let old_staff = old.staff();
        let new_staff = new.staff();

        Self {
            detach_users: old_staff.difference(&new_staff).cloned().collect(),
            detach_interns: old.interns.difference(&new.interns).cloned().collect(),
            attach_users: new_staff.into_iter().collect(),
            attach_interns: new.interns.iter().cloned().collect(),
        }
    }

    /// Plan for a team that did not exist before
    pub fn for_new_team(membership: &Membership) -> Self {
        Self::between(&Membership::default(), membership)
    }

    pub fn detach_count(&self) -> usize {
        self.detach_users.len() + self.detach_interns.len()
    }

    pub fn attach_count(&self) -> usize {
        self.attach_users.len() + self.attach_interns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn intern(id: &str) -> InternId {
        InternId::new(id).unwrap()
    }

    #[test]
    fn test_staff_is_union_of_mentors_and_panelists() {
        let membership = Membership::new(
            [user("u1"), user("u2")],
            [],
            [user("u2"), user("u3")],
        );

        let staff = membership.staff();
        assert_eq!(staff.len(), 3);
        assert!(staff.contains(&user("u3")));
        assert!(!staff.contains(&user("u4")));
    }

    #[test]
    fn test_plan_detaches_only_removed_members() {
        let old = Membership::new([user("u1"), user("u2")], [intern("i1"), intern("i2")], []);
        let new = Membership::new([user("u2")], [intern("i2"), intern("i3")], [user("u3")]);

        let plan = MembershipPlan::between(&old, &new);

        assert_eq!(plan.detach_users, vec![user("u1")]);
        assert_eq!(plan.detach_interns, vec![intern("i1")]);
        assert_eq!(plan.attach_users, vec![user("u2"), user("u3")]);
        assert_eq!(plan.attach_interns, vec![intern("i2"), intern("i3")]);
    }

    #[test]
    fn test_role_change_keeps_user_attached() {
        // A mentor who becomes a panelist never leaves the team
        let old = Membership::new([user("u1")], [], []);
        let new = Membership::new([], [], [user("u1")]);

        let plan = MembershipPlan::between(&old, &new);

        assert!(plan.detach_users.is_empty());
        assert_eq!(plan.attach_users, vec![user("u1")]);
    }

    #[test]
    fn test_same_membership_detaches_nothing() {
        let membership = Membership::new([user("u1")], [intern("i1")], [user("u2")]);

        let plan = MembershipPlan::between(&membership, &membership);

        assert_eq!(plan.detach_count(), 0);
        assert_eq!(plan.attach_count(), 3);
    }

    #[test]
    fn test_clearing_membership() {
        let old = Membership::new([user("u1")], [intern("i1")], [user("u2")]);

        let plan = MembershipPlan::between(&old, &Membership::default());

        assert_eq!(plan.detach_count(), 3);
        assert_eq!(plan.attach_count(), 0);
    }

    #[test]
    fn test_new_team_plan() {
        let membership = Membership::new([user("u1")], [intern("i1")], []);

        let plan = MembershipPlan::for_new_team(&membership);

        assert_eq!(plan.detach_count(), 0);
        assert_eq!(plan.attach_users, vec![user("u1")]);
        assert_eq!(plan.attach_interns, vec![intern("i1")]);
    }
}
