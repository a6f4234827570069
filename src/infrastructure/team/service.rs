//! Team service: team creation, membership edits and reconciliation
//!
//! Team membership lives on both sides: the team lists its members and
//! every member lists the team in its `teams` set. Writes go to several
//! documents without a transaction. They are ordered so that a validation
//! failure writes nothing, and every write is idempotent, so `reconcile`
//! can repair whatever a crash in the middle leaves behind.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::domain::intern::{InternId, InternRepository};
use crate::domain::organization::OrganizationId;
use crate::domain::team::{Membership, MembershipPlan, Team, TeamId, TeamRepository};
use crate::domain::user::{User, UserId, UserRepository};

/// Request for creating a team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    /// Username of the admin making the change
    pub requester: String,
    pub team_name: String,
    pub mentors: Vec<String>,
    pub interns: Vec<String>,
    pub panelists: Vec<String>,
    pub description: String,
}

/// Request for replacing a team's members and description
#[derive(Debug, Clone)]
pub struct EditTeamRequest {
    /// Username of the admin making the change
    pub requester: String,
    pub team_name: String,
    pub mentors: Vec<String>,
    pub interns: Vec<String>,
    pub panelists: Vec<String>,
    pub description: String,
}

/// Counts from a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub teams_checked: usize,
    pub links_added: usize,
    pub links_removed: usize,
}

/// Team service
#[derive(Debug)]
pub struct TeamService<T, U, I>
where
    T: TeamRepository,
    U: UserRepository,
    I: InternRepository,
{
    teams: Arc<T>,
    users: Arc<U>,
    interns: Arc<I>,
}

impl<T, U, I> TeamService<T, U, I>
where
    T: TeamRepository,
    U: UserRepository,
    I: InternRepository,
{
    pub fn new(teams: Arc<T>, users: Arc<U>, interns: Arc<I>) -> Self {
        Self {
            teams,
            users,
            interns,
        }
    }

    /// Create a team and attach its members
    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        let admin = self
            .authorize_admin(&request.requester, "Only admins can create teams")
            .await?;

        info!(
            team = %request.team_name,
            organization = %admin.organization_id(),
            requester = %request.requester,
            "Creating team"
        );

        let members = self
            .resolve_members(&admin, &request.mentors, &request.interns, &request.panelists)
            .await?;

        let team = Team::new(
            TeamId::generate(),
            &request.team_name,
            admin.organization_id().clone(),
            &request.description,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?
        .with_members(members);

        let plan = MembershipPlan::for_new_team(team.members());
        let team = self.teams.create(team).await?;
        self.attach(team.id(), &plan).await?;

        info!(team_id = %team.id(), members = plan.attach_count(), "Team created");
        Ok(team)
    }

    /// Replace a team's members and description, keeping member
    /// back-references in step
    pub async fn edit_team(&self, request: EditTeamRequest) -> Result<Team, DomainError> {
        let admin = self
            .authorize_admin(&request.requester, "Only admins can edit teams")
            .await?;

        let mut team = self
            .teams
            .find_by_name(admin.organization_id(), request.team_name.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Team not found"))?;

        let members = self
            .resolve_members(&admin, &request.mentors, &request.interns, &request.panelists)
            .await?;

        let plan = MembershipPlan::between(team.members(), &members);
        team.rewrite(members, &request.description)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        info!(
            team_id = %team.id(),
            team = %team.team_name(),
            requester = %request.requester,
            detach = plan.detach_count(),
            attach = plan.attach_count(),
            "Editing team"
        );

        self.detach(team.id(), &plan).await?;

        let team = self.teams.update(team).await.map_err(|e| match e {
            DomainError::NotFound { .. } => {
                warn!(team = %request.team_name, "Team vanished during edit");
                DomainError::not_found("Team not found")
            }
            other => other,
        })?;

        self.attach(team.id(), &plan).await?;

        info!(team_id = %team.id(), "Team updated");
        Ok(team)
    }

    /// Teams of the requester's organization, sorted by name
    pub async fn list_teams(&self, requester: &str) -> Result<Vec<Team>, DomainError> {
        let requester = requester.trim();
        let user = self
            .users
            .get_by_username(requester)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", requester)))?;

        self.teams.list_by_organization(user.organization_id()).await
    }

    /// Re-establish back-references for every team, or the teams of one
    /// organization. Safe to run at any time.
    pub async fn reconcile(
        &self,
        organization_id: Option<&OrganizationId>,
    ) -> Result<ReconcileReport, DomainError> {
        let teams = match organization_id {
            Some(org) => self.teams.list_by_organization(org).await?,
            None => self.teams.list().await?,
        };

        let mut report = ReconcileReport::default();

        for team in &teams {
            let observed = Membership::new(
                self.users
                    .find_by_team(team.id())
                    .await?
                    .into_iter()
                    .map(|u| u.id().clone()),
                self.interns
                    .find_by_team(team.id())
                    .await?
                    .into_iter()
                    .map(|i| i.id().clone()),
                [],
            );

            let plan = MembershipPlan::between(&observed, team.members());
            let removed = self.detach(team.id(), &plan).await?;
            let added = self.attach(team.id(), &plan).await?;

            if added + removed > 0 {
                info!(
                    team_id = %team.id(),
                    added,
                    removed,
                    "Repaired team back-references"
                );
            }

            report.teams_checked += 1;
            report.links_added += added;
            report.links_removed += removed;
        }

        info!(
            teams = report.teams_checked,
            added = report.links_added,
            removed = report.links_removed,
            "Reconciliation finished"
        );
        Ok(report)
    }

    async fn authorize_admin(&self, username: &str, denial: &str) -> Result<User, DomainError> {
        let username = username.trim();

        match self.users.get_by_username(username).await? {
            Some(user) if user.is_admin() => Ok(user),
            _ => {
                warn!(requester = %username, "Rejected team change from non-admin");
                Err(DomainError::forbidden(denial))
            }
        }
    }

    /// Resolve the three username lists within the admin's organization.
    /// Duplicates are ignored; any unknown username fails the whole set.
    async fn resolve_members(
        &self,
        admin: &User,
        mentors: &[String],
        interns: &[String],
        panelists: &[String],
    ) -> Result<Membership, DomainError> {
        let mentors = self.resolve_staff(admin, mentors, "mentors").await?;
        let interns = self.resolve_interns(admin, interns).await?;
        let panelists = self.resolve_staff(admin, panelists, "panelists").await?;

        Ok(Membership::new(mentors, interns, panelists))
    }

    async fn resolve_staff(
        &self,
        admin: &User,
        usernames: &[String],
        label: &str,
    ) -> Result<Vec<UserId>, DomainError> {
        let wanted = unique(usernames);
        let found = self
            .users
            .find_in_organization(admin.organization_id(), &wanted)
            .await?;

        if found.len() != wanted.len() {
            debug!(requested = wanted.len(), found = found.len(), label, "Unresolved members");
            return Err(DomainError::validation(format!("Some {} not found", label)));
        }

        Ok(found.into_iter().map(|u| u.id().clone()).collect())
    }

    /// Interns are matched on organization *name*: older intern records do
    /// not carry an organization id.
    async fn resolve_interns(
        &self,
        admin: &User,
        usernames: &[String],
    ) -> Result<Vec<InternId>, DomainError> {
        let wanted = unique(usernames);
        let found = self
            .interns
            .find_in_organization_name(admin.organization_name(), &wanted)
            .await?;

        if found.len() != wanted.len() {
            debug!(requested = wanted.len(), found = found.len(), "Unresolved interns");
            return Err(DomainError::validation("Some interns not found"));
        }

        Ok(found.into_iter().map(|i| i.id().clone()).collect())
    }

    async fn detach(&self, team_id: &TeamId, plan: &MembershipPlan) -> Result<usize, DomainError> {
        let mut removed = 0;

        for user_id in &plan.detach_users {
            if self.users.remove_team(user_id, team_id).await? {
                removed += 1;
            }
        }

        for intern_id in &plan.detach_interns {
            if self.interns.remove_team(intern_id, team_id).await? {
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn attach(&self, team_id: &TeamId, plan: &MembershipPlan) -> Result<usize, DomainError> {
        let mut added = 0;

        for user_id in &plan.attach_users {
            if self.users.add_team(user_id, team_id).await? {
                added += 1;
            }
        }

        for intern_id in &plan.attach_interns {
            if self.interns.add_team(intern_id, team_id).await? {
                added += 1;
            }
        }

        Ok(added)
    }
}

fn unique(usernames: &[String]) -> Vec<String> {
    usernames
        .iter()
        .map(|u| u.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intern::Intern;
    use crate::domain::organization::{Affiliation, OrganizationRef};
    use crate::domain::team::MockTeamRepository;
    use crate::domain::user::UserRole;
    use crate::infrastructure::intern::StorageInternRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::team::StorageTeamRepository;
    use crate::infrastructure::user::StorageUserRepository;

    type Service = TeamService<StorageTeamRepository, StorageUserRepository, StorageInternRepository>;

    struct Fixture {
        service: Service,
        teams: Arc<StorageTeamRepository>,
        users: Arc<StorageUserRepository>,
        interns: Arc<StorageInternRepository>,
    }

    fn acme() -> OrganizationRef {
        OrganizationRef::new(OrganizationId::new("org-acme").unwrap(), "Acme")
    }

    fn globex() -> OrganizationRef {
        OrganizationRef::new(OrganizationId::new("org-globex").unwrap(), "Globex")
    }

    async fn fixture() -> Fixture {
        let teams = Arc::new(StorageTeamRepository::new(Arc::new(
            InMemoryStorage::<Team>::new(),
        )));
        let users = Arc::new(StorageUserRepository::new(Arc::new(
            InMemoryStorage::<User>::new(),
        )));
        let interns = Arc::new(StorageInternRepository::new(Arc::new(
            InMemoryStorage::<Intern>::new(),
        )));

        for (name, org, role) in [
            ("admin", acme(), UserRole::Admin),
            ("m1", acme(), UserRole::Mentor),
            ("m2", acme(), UserRole::Mentor),
            ("p1", acme(), UserRole::Panelist),
            ("employee", acme(), UserRole::Employee),
            ("outsider", globex(), UserRole::Mentor),
        ] {
            users
                .create(User::new(UserId::generate(), name, org, role))
                .await
                .unwrap();
        }

        for (name, org) in [("i1", Some("Acme")), ("i2", Some("Acme")), ("i3", None)] {
            let affiliation = match org {
                Some(org) => Affiliation::member(None, org),
                None => Affiliation::Unaffiliated,
            };
            interns
                .create(
                    Intern::new(
                        InternId::generate(),
                        name,
                        &format!("{}@example.com", name),
                        affiliation,
                    )
                    .unwrap(),
                )
                .await
                .unwrap();
        }

        Fixture {
            service: TeamService::new(teams.clone(), users.clone(), interns.clone()),
            teams,
            users,
            interns,
        }
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn create_request(mentors: &[&str], interns: &[&str], panelists: &[&str]) -> CreateTeamRequest {
        CreateTeamRequest {
            requester: "admin".to_string(),
            team_name: "Platform".to_string(),
            mentors: names(mentors),
            interns: names(interns),
            panelists: names(panelists),
            description: "Builds the platform".to_string(),
        }
    }

    fn edit_request(mentors: &[&str], interns: &[&str], panelists: &[&str]) -> EditTeamRequest {
        EditTeamRequest {
            requester: "admin".to_string(),
            team_name: "Platform".to_string(),
            mentors: names(mentors),
            interns: names(interns),
            panelists: names(panelists),
            description: "New description".to_string(),
        }
    }

    async fn user_teams(f: &Fixture, username: &str) -> BTreeSet<TeamId> {
        f.users
            .get_by_username(username)
            .await
            .unwrap()
            .unwrap()
            .teams()
            .clone()
    }

    async fn intern_teams(f: &Fixture, username: &str) -> BTreeSet<TeamId> {
        f.interns
            .get_by_username(username)
            .await
            .unwrap()
            .unwrap()
            .teams()
            .clone()
    }

    #[tokio::test]
    async fn test_create_team_attaches_members() {
        let f = fixture().await;

        let team = f
            .service
            .create_team(create_request(&["m1"], &["i1"], &["p1"]))
            .await
            .unwrap();

        assert_eq!(team.members().mentors.len(), 1);
        assert!(user_teams(&f, "m1").await.contains(team.id()));
        assert!(user_teams(&f, "p1").await.contains(team.id()));
        assert!(intern_teams(&f, "i1").await.contains(team.id()));
        assert!(user_teams(&f, "m2").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_team_name() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&[], &[], &[]))
            .await
            .unwrap();

        let result = f.service.create_team(create_request(&["m1"], &[], &[])).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert!(user_teams(&f, "m1").await.is_empty());
    }

    #[tokio::test]
    async fn test_edit_moves_back_references() {
        let f = fixture().await;
        let team = f
            .service
            .create_team(create_request(&["m1"], &["i1"], &["p1"]))
            .await
            .unwrap();

        let edited = f
            .service
            .edit_team(edit_request(&["m2"], &["i2"], &["p1"]))
            .await
            .unwrap();

        assert_eq!(edited.id(), team.id());
        assert_eq!(edited.description(), "New description");
        assert!(user_teams(&f, "m1").await.is_empty());
        assert!(intern_teams(&f, "i1").await.is_empty());
        assert!(user_teams(&f, "m2").await.contains(team.id()));
        assert!(user_teams(&f, "p1").await.contains(team.id()));
        assert!(intern_teams(&f, "i2").await.contains(team.id()));
    }

    #[tokio::test]
    async fn test_edit_deduplicates_usernames() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&[], &[], &[]))
            .await
            .unwrap();

        let edited = f
            .service
            .edit_team(edit_request(&["m1", "m1", "m1"], &["i1", "i1"], &[]))
            .await
            .unwrap();

        assert_eq!(edited.members().mentors.len(), 1);
        assert_eq!(edited.members().interns.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_with_unknown_member_writes_nothing() {
        let f = fixture().await;
        let team = f
            .service
            .create_team(create_request(&["m1"], &["i1"], &[]))
            .await
            .unwrap();

        let result = f
            .service
            .edit_team(edit_request(&["m2", "ghost"], &[], &[]))
            .await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert_eq!(message, "Some mentors not found")
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let stored = f.teams.get(team.id()).await.unwrap().unwrap();
        assert_eq!(stored.description(), "Builds the platform");
        assert_eq!(stored.members(), team.members());
        assert!(user_teams(&f, "m1").await.contains(team.id()));
        assert!(user_teams(&f, "m2").await.is_empty());
    }

    #[tokio::test]
    async fn test_members_are_scoped_to_organization() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&[], &[], &[]))
            .await
            .unwrap();

        let outsider = f
            .service
            .edit_team(edit_request(&[], &[], &["outsider"]))
            .await;
        assert_eq!(
            outsider.unwrap_err().message(),
            "Some panelists not found"
        );

        let unaffiliated = f.service.edit_team(edit_request(&[], &["i3"], &[])).await;
        assert_eq!(unaffiliated.unwrap_err().message(), "Some interns not found");
    }

    #[tokio::test]
    async fn test_only_admins_edit() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&[], &[], &[]))
            .await
            .unwrap();

        for requester in ["m1", "employee", "nobody"] {
            let mut request = edit_request(&["ghost"], &[], &[]);
            request.requester = requester.to_string();

            let result = f.service.edit_team(request).await;
            assert!(
                matches!(result, Err(DomainError::Forbidden { .. })),
                "{} should be forbidden",
                requester
            );
        }
    }

    #[tokio::test]
    async fn test_padded_requester_and_names_are_trimmed() {
        let f = fixture().await;
        let mut create = create_request(&["m1"], &[], &[]);
        create.requester = "  admin ".to_string();
        f.service.create_team(create).await.unwrap();

        let mut edit = edit_request(&[" m2"], &["i1 "], &[]);
        edit.requester = " admin".to_string();
        edit.team_name = " Platform ".to_string();
        let team = f.service.edit_team(edit).await.unwrap();

        assert_eq!(team.members().mentors.len(), 1);
        assert_eq!(user_teams(&f, "m2").await.len(), 1);
        assert_eq!(intern_teams(&f, "i1").await.len(), 1);

        let listed = f.service.list_teams(" m1 ").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_unknown_team() {
        let f = fixture().await;

        let result = f.service.edit_team(edit_request(&[], &[], &[])).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_edit_rejects_empty_description() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&["m1"], &[], &[]))
            .await
            .unwrap();

        let mut request = edit_request(&[], &[], &[]);
        request.description = "  ".to_string();

        let result = f.service.edit_team(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(user_teams(&f, "m1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_is_repeatable() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&["m1"], &[], &[]))
            .await
            .unwrap();

        let first = f
            .service
            .edit_team(edit_request(&["m2"], &["i1"], &["m2"]))
            .await
            .unwrap();
        let second = f
            .service
            .edit_team(edit_request(&["m2"], &["i1"], &["m2"]))
            .await
            .unwrap();

        assert_eq!(first.members(), second.members());
        assert_eq!(user_teams(&f, "m2").await.len(), 1);
        assert!(user_teams(&f, "m1").await.is_empty());
    }

    #[tokio::test]
    async fn test_team_vanishing_mid_edit_is_not_found() {
        let f = fixture().await;
        let admin = f.users.get_by_username("admin").await.unwrap().unwrap();
        let existing = Team::new(
            TeamId::generate(),
            "Platform",
            admin.organization_id().clone(),
            "Old",
        )
        .unwrap();

        let mut teams = MockTeamRepository::new();
        teams
            .expect_find_by_name()
            .returning(move |_, _| Ok(Some(existing.clone())));
        teams
            .expect_update()
            .times(1)
            .returning(|_| Err(DomainError::not_found("Document missing")));

        let service = TeamService::new(Arc::new(teams), f.users.clone(), f.interns.clone());

        let result = service.edit_team(edit_request(&["m1"], &[], &[])).await;

        match result {
            Err(DomainError::NotFound { message }) => assert_eq!(message, "Team not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(user_teams(&f, "m1").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_teams_for_requester_organization() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&[], &[], &[]))
            .await
            .unwrap();
        let mut other = create_request(&[], &[], &[]);
        other.team_name = "Data".to_string();
        f.service.create_team(other).await.unwrap();

        let teams = f.service.list_teams("m1").await.unwrap();
        let team_names: Vec<_> = teams.iter().map(|t| t.team_name()).collect();
        assert_eq!(team_names, vec!["Data", "Platform"]);

        assert!(f.service.list_teams("outsider").await.unwrap().is_empty());
        assert!(matches!(
            f.service.list_teams("nobody").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_reconcile_repairs_back_references() {
        let f = fixture().await;
        let team = f
            .service
            .create_team(create_request(&["m1"], &["i1"], &[]))
            .await
            .unwrap();

        // Simulate a crash: m1 lost its link, m2 kept a stale one
        let m1 = f.users.get_by_username("m1").await.unwrap().unwrap();
        let m2 = f.users.get_by_username("m2").await.unwrap().unwrap();
        f.users.remove_team(m1.id(), team.id()).await.unwrap();
        f.users.add_team(m2.id(), team.id()).await.unwrap();

        let report = f.service.reconcile(None).await.unwrap();

        assert_eq!(
            report,
            ReconcileReport {
                teams_checked: 1,
                links_added: 1,
                links_removed: 1,
            }
        );
        assert!(user_teams(&f, "m1").await.contains(team.id()));
        assert!(user_teams(&f, "m2").await.is_empty());

        let again = f.service.reconcile(None).await.unwrap();
        assert_eq!(again.links_added + again.links_removed, 0);
    }

    #[tokio::test]
    async fn test_reconcile_one_organization() {
        let f = fixture().await;
        f.service
            .create_team(create_request(&["m1"], &[], &[]))
            .await
            .unwrap();

        let other = OrganizationId::new("org-globex").unwrap();
        let report = f.service.reconcile(Some(&other)).await.unwrap();

        assert_eq!(report.teams_checked, 0);
    }
}
