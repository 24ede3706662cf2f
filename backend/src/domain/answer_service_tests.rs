//! Tests for answer use-cases.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::QuestionCommand;
use crate::test_support::TestContext;

#[fixture]
fn ctx() -> TestContext {
    TestContext::new()
}

async fn question_by(ctx: &TestContext, token: &AccessToken) -> QuestionId {
    *ctx.questions
        .create(token, "what is X?")
        .await
        .expect("question")
        .id()
}

#[rstest]
#[tokio::test]
async fn answers_attach_to_existing_questions(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let question_id = question_by(&ctx, &alice).await;

    let answer = ctx
        .answers
        .create(&bob, &question_id, "X is Y")
        .await
        .expect("answer");
    assert_eq!(answer.question_id(), &question_id);
    assert_eq!(answer.created_at(), ctx.clock.utc());
}

#[rstest]
#[tokio::test]
async fn answering_a_missing_question_fails_with_ques_001(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let err = ctx
        .answers
        .create(&alice, &QuestionId::random(), "orphan")
        .await
        .expect_err("missing question");
    assert_eq!(err.reason(), Some(ReasonCode::QuestionNotFound));
}

#[rstest]
#[tokio::test]
async fn blank_answers_are_rejected_before_lookup(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let err = ctx
        .answers
        .create(&alice, &QuestionId::random(), "")
        .await
        .expect_err("blank");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn edit_is_owner_only(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let admin = ctx.admin("root").await;
    let question_id = question_by(&ctx, &alice).await;
    let answer = ctx
        .answers
        .create(&bob, &question_id, "X is Y")
        .await
        .expect("answer");

    for intruder in [&alice, &admin] {
        let err = ctx
            .answers
            .edit(intruder, answer.id(), "nope")
            .await
            .expect_err("non-owner");
        assert_eq!(err.reason(), Some(ReasonCode::NotPermitted));
    }

    let edited = ctx
        .answers
        .edit(&bob, answer.id(), "X is Z")
        .await
        .expect("owner edit");
    assert_eq!(edited.content().as_ref(), "X is Z");
}

#[rstest]
#[tokio::test]
async fn delete_allows_owner_and_admin(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let admin = ctx.admin("root").await;
    let question_id = question_by(&ctx, &alice).await;
    let first = ctx
        .answers
        .create(&bob, &question_id, "one")
        .await
        .expect("answer");
    let second = ctx
        .answers
        .create(&bob, &question_id, "two")
        .await
        .expect("answer");

    let err = ctx
        .answers
        .delete(&alice, first.id())
        .await
        .expect_err("question owner is not answer owner");
    assert_eq!(err.reason(), Some(ReasonCode::NotPermitted));

    ctx.answers
        .delete(&admin, first.id())
        .await
        .expect("admin delete");
    ctx.answers
        .delete(&bob, second.id())
        .await
        .expect("owner delete");

    let err = ctx
        .answers
        .delete(&bob, second.id())
        .await
        .expect_err("already gone");
    assert_eq!(err.reason(), Some(ReasonCode::AnswerNotFound));
}

#[rstest]
#[tokio::test]
async fn answers_list_in_insertion_order(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let bob = ctx.signin("bob").await;
    let question_id = question_by(&ctx, &alice).await;
    let other_question = question_by(&ctx, &bob).await;
    for text in ["first", "second", "third"] {
        ctx.answers
            .create(&bob, &question_id, text)
            .await
            .expect("answer");
    }
    ctx.answers
        .create(&alice, &other_question, "elsewhere")
        .await
        .expect("answer");

    let answers = ctx
        .answers
        .list_for_question(&alice, &question_id)
        .await
        .expect("list");
    let texts: Vec<&str> = answers.iter().map(|a| a.content().as_ref()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[rstest]
#[tokio::test]
async fn question_deletion_leaves_answers_unreachable_by_listing(ctx: TestContext) {
    let alice = ctx.signin("alice").await;
    let question_id = question_by(&ctx, &alice).await;
    let answer = ctx
        .answers
        .create(&alice, &question_id, "self answer")
        .await
        .expect("answer");
    ctx.questions
        .delete(&alice, &question_id)
        .await
        .expect("delete question");

    let err = ctx
        .answers
        .list_for_question(&alice, &question_id)
        .await
        .expect_err("question gone");
    assert_eq!(err.reason(), Some(ReasonCode::QuestionNotFound));

    // No cascade: the answer itself survives and stays editable by its owner.
    ctx.answers
        .edit(&alice, answer.id(), "still here")
        .await
        .expect("answer survives");
}
