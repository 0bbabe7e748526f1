//! Tests for the account service.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenIssuer, MockUserRepository};
use crate::domain::{
    AccessToken, BloodType, ErrorCode, PasswordHash, RegistrationParts, Role, UserName,
};

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }
}

#[fixture]
fn registration() -> Registration {
    Registration::try_from_parts(RegistrationParts {
        name: "Ada Lovelace",
        email: "ada@example.com",
        password: "secret1",
        role: "donor",
        blood_type: Some("A+"),
    })
    .expect("valid registration")
}

fn stored_account() -> UserAccount {
    UserAccount {
        user: User {
            id: UserId::random(),
            name: UserName::new("Ada Lovelace").expect("name"),
            email: EmailAddress::new("ada@example.com").expect("email"),
            role: Role::Donor,
            blood_type: Some(BloodType::APositive),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        },
        password_hash: PasswordHash::new("hashed:secret1"),
    }
}

fn hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(PasswordHash::new(format!("hashed:{password}"))));
    hasher
        .expect_verify()
        .returning(|password, hash| Ok(hash.as_ref() == format!("hashed:{password}")));
    hasher
}

fn tokens() -> MockTokenIssuer {
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_issue()
        .returning(|identity| Ok(AccessToken::new(format!("token-for-{}", identity.user_id))));
    tokens
}

fn service(repo: MockUserRepository) -> AccountsService<MockUserRepository> {
    AccountsService::new(
        Arc::new(repo),
        Arc::new(hasher()),
        Arc::new(tokens()),
        Arc::new(FixtureClock),
    )
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password_and_issues_token(registration: Registration) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .withf(|account: &UserAccount| {
            account.password_hash.as_ref() == "hashed:secret1"
                && account.user.email.as_ref() == "ada@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let session = service(repo)
        .register(registration)
        .await
        .expect("registration succeeds");

    assert_eq!(session.user.role, Role::Donor);
    assert_eq!(session.user.blood_type, Some(BloodType::APositive));
    assert_eq!(
        session.token.as_ref(),
        format!("token-for-{}", session.user.id)
    );
}

#[rstest]
#[tokio::test]
async fn register_maps_duplicate_email_to_conflict(registration: Registration) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::duplicate_email("ada@example.com")));

    let error = service(repo)
        .register(registration)
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn register_stops_when_hashing_fails(registration: Registration) {
    let mut failing = MockPasswordHasher::new();
    failing
        .expect_hash()
        .times(1)
        .return_once(|_| Err(PasswordHasherError::hash("parameters rejected")));
    let mut repo = MockUserRepository::new();
    repo.expect_insert().times(0);

    let service = AccountsService::new(
        Arc::new(repo),
        Arc::new(failing),
        Arc::new(tokens()),
        Arc::new(FixtureClock),
    );
    let error = service
        .register(registration)
        .await
        .expect_err("hashing failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_verifies_on_a_multi_threaded_runtime() {
    let account = stored_account();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));

    let credentials =
        LoginCredentials::try_from_parts("ada@example.com", "secret1").expect("credentials");
    let session = service(repo)
        .login(credentials)
        .await
        .expect("login succeeds");

    assert_eq!(session.user.email.as_ref(), "ada@example.com");
}

#[rstest]
#[tokio::test]
async fn login_with_correct_password_issues_token() {
    let account = stored_account();
    let expected_id = account.user.id;
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));

    let credentials =
        LoginCredentials::try_from_parts("ADA@example.com", "secret1").expect("credentials");
    let session = service(repo)
        .login(credentials)
        .await
        .expect("login succeeds");

    assert_eq!(session.user.id, expected_id);
}

#[rstest]
#[case("ada@example.com", "wrong-password", true)]
#[case("nobody@example.com", "secret1", false)]
#[case("not-an-email", "secret1", false)]
#[tokio::test]
async fn login_failures_share_one_message(
    #[case] email: &str,
    #[case] password: &str,
    #[case] account_exists: bool,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(move |_| {
        Ok(account_exists.then(stored_account))
    });

    let credentials = LoginCredentials::try_from_parts(email, password).expect("credentials");
    let error = service(repo)
        .login(credentials)
        .await
        .expect_err("login rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Invalid credentials");
}

#[rstest]
#[case(TokenIssuerError::Invalid)]
#[case(TokenIssuerError::Expired)]
fn authenticate_maps_bad_tokens_to_unauthorized(#[case] failure: TokenIssuerError) {
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_verify().return_once(move |_| Err(failure));
    let service = AccountsService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(hasher()),
        Arc::new(tokens),
        Arc::new(FixtureClock),
    );

    let error = service.authenticate("garbage").expect_err("rejected token");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn list_users_orders_by_name() {
    let mut zed = stored_account().user;
    zed.name = UserName::new("Zed").expect("name");
    let mut amy = stored_account().user;
    amy.name = UserName::new("Amy").expect("name");
    let stored = vec![zed, amy];

    let mut repo = MockUserRepository::new();
    repo.expect_list_all().times(1).return_once(move || Ok(stored));

    let users = service(repo).list_users().await.expect("users listed");
    let names: Vec<&str> = users.iter().map(|u| u.name.as_ref()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
}
