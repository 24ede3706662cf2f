//! Tests for question use-cases.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockQuestionRepository;
use crate::test_support::TestContext;

#[fixture]
fn ctx() -> TestContext {
    TestContext::new()
}

#[rstest]
#[tokio::test]
async fn create_stamps_owner_and_clock(ctx: TestContext) {
    let token = ctx.signin("alice").await;
    let question = ctx
        .questions
        .create(&token, "what is X?")
        .await
        .expect("create");

    let alice = ctx
        .authority
        .require_active(&token)
        .await
        .expect("active")
        .user;
    assert_eq!(question.owner(), alice.id());
    assert_eq!(question.created_at(), ctx.clock.utc());
    assert_eq!(question.content().as_ref(), "what is X?");
}

#[rstest]
#[tokio::test]
async fn blank_content_is_an_invalid_request(ctx: TestContext) {
    let token = ctx.signin("alice").await;
    let err = ctx
        .questions
        .create(&token, "   ")
        .await
        .expect_err("blank");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.reason(), None);
}

#[rstest]
#[tokio::test]
async fn session_is_checked_before_content(ctx: TestContext) {
    let token = AccessToken::new("never-issued").expect("token");
    let err = ctx
        .questions
        .create(&token, "")
        .await
        .expect_err("no session");
    assert_eq!(err.reason(), Some(ReasonCode::NoActiveSession));
}

#[rstest]
#[tokio::test]
async fn signed_out_users_cannot_post(ctx: TestContext) {
    let token = ctx.signin("alice").await;
    ctx.authority.revoke(&token).await.expect("revoke");
    let err = ctx
        .questions
        .create(&token, "late question")
        .await
        .expect_err("signed out");
    assert_eq!(err.reason(), Some(ReasonCode::SignedOut));
}

#[rstest]
#[tokio::test]
async fn only_the_owner_may_edit(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let admin = ctx.admin("root").await;
    let question = ctx
        .questions
        .create(&alice, "what is X?")
        .await
        .expect("create");

    for intruder in [&bob, &admin] {
        let err = ctx
            .questions
            .edit(intruder, question.id(), "hijacked")
            .await
            .expect_err("non-owner edit");
        assert_eq!(err.reason(), Some(ReasonCode::NotPermitted));
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    let edited = ctx
        .questions
        .edit(&alice, question.id(), "what is Y?")
        .await
        .expect("owner edit");
    assert_eq!(edited.content().as_ref(), "what is Y?");
    assert_eq!(edited.id(), question.id());
}

#[rstest]
#[tokio::test]
async fn owner_or_admin_may_delete(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let admin = ctx.admin("root").await;
    let first = ctx.questions.create(&alice, "one").await.expect("create");
    let second = ctx.questions.create(&alice, "two").await.expect("create");

    let err = ctx
        .questions
        .delete(&bob, first.id())
        .await
        .expect_err("third party");
    assert_eq!(err.reason(), Some(ReasonCode::NotPermitted));

    let removed = ctx
        .questions
        .delete(&admin, first.id())
        .await
        .expect("admin delete");
    assert_eq!(removed.id(), first.id());

    let removed = ctx
        .questions
        .delete(&alice, second.id())
        .await
        .expect("owner delete");
    assert_eq!(removed.id(), second.id());
}

#[rstest]
#[tokio::test]
async fn edit_after_delete_fails_with_ques_001(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let question = ctx.questions.create(&alice, "v1").await.expect("create");
    ctx.questions
        .edit(&alice, question.id(), "v2")
        .await
        .expect("edit");
    ctx.questions
        .delete(&alice, question.id())
        .await
        .expect("delete");

    let err = ctx
        .questions
        .edit(&alice, question.id(), "v3")
        .await
        .expect_err("deleted");
    assert_eq!(err.reason(), Some(ReasonCode::QuestionNotFound));
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn listings_filter_by_owner(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    ctx.questions.create(&alice, "a1").await.expect("create");
    ctx.questions.create(&bob, "b1").await.expect("create");
    ctx.questions.create(&alice, "a2").await.expect("create");

    let all = ctx.questions.list_all(&bob).await.expect("list");
    let texts: Vec<&str> = all.iter().map(|q| q.content().as_ref()).collect();
    assert_eq!(texts, ["a1", "b1", "a2"]);

    let alice_id = *ctx
        .authority
        .require_active(&alice)
        .await
        .expect("active")
        .user
        .id();
    let mine = ctx
        .questions
        .list_by_user(&bob, &alice_id)
        .await
        .expect("list");
    let texts: Vec<&str> = mine.iter().map(|q| q.content().as_ref()).collect();
    assert_eq!(texts, ["a1", "a2"]);
}

#[rstest]
#[tokio::test]
async fn listing_an_unknown_user_fails_with_usr_001(ctx: TestContext) {
    let token = ctx.signin("alice").await;
    let err = ctx
        .questions
        .list_by_user(&token, &UserId::random())
        .await
        .expect_err("unknown user");
    assert_eq!(err.reason(), Some(ReasonCode::UserNotFound));
}

#[rstest]
#[tokio::test]
async fn denied_edits_never_write(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let alice_id = *ctx
        .authority
        .require_active(&alice)
        .await
        .expect("active")
        .user
        .id();
    let question = Question::new(
        QuestionId::random(),
        Content::new("mine").expect("content"),
        ctx.clock.utc(),
        alice_id,
    );

    let mut repo = MockQuestionRepository::new();
    let stored = question.clone();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_update().times(0);
    repo.expect_delete().times(0);

    let service = QuestionService::new(
        ctx.authority.clone(),
        Arc::new(repo),
        ctx.store.clone(),
        ctx.clock.clone(),
    );
    let err = service
        .edit(&bob, question.id(), "hijacked")
        .await
        .expect_err("denied");
    assert_eq!(err.reason(), Some(ReasonCode::NotPermitted));
}
