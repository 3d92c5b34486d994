use std::sync::Arc;

use super::common::*;
use crate::triage::domain::SessionId;
use crate::triage::questionnaire::{QuestionnaireEvent, QuestionnaireStep};
use crate::triage::repository::{RepositoryError, SessionRepository, TriageNotifier};
use crate::triage::screening::ScreeningEvent;
use crate::triage::service::{TriageService, TriageServiceError};
use crate::triage::session::{SessionStep, TriageAction, TriageNotification};

#[test]
fn start_persists_a_fresh_session() {
    let (service, repository, notifier) = build_service();
    let view = service.start(mochi()).expect("session starts");

    assert!(view.session_id.0.starts_with("triage-"));
    assert_eq!(view.subject.name, "Mochi");
    assert!(view.pending_prompt.is_some());
    assert!(repository
        .sessions
        .lock()
        .expect("repository mutex poisoned")
        .contains_key(&view.session_id));
    assert!(notifier.envelopes().is_empty());
}

#[test]
fn session_ids_are_unique() {
    let (service, _, _) = build_service();
    let first = service.start(mochi()).expect("first");
    let second = service.start(kiwi()).expect("second");
    assert_ne!(first.session_id, second.session_id);
}

#[test]
fn full_assessment_publishes_the_payload_once() {
    let (service, _, notifier) = build_service();
    let id = service.start(mochi()).expect("session starts").session_id;

    let mut actions = calm_screening();
    actions.extend(digestive_questionnaire());
    actions.push(questionnaire(QuestionnaireEvent::Submit));
    for action in actions {
        service.dispatch(&id, action).expect("action accepted");
    }

    let envelopes = notifier.envelopes();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].session_id, id);
    assert_eq!(envelopes[0].pet_id, 42);
    match &envelopes[0].notification {
        TriageNotification::AssessmentCompleted(payload) => {
            assert_eq!(payload.symptom_count, 3)
        }
        other => panic!("expected assessment payload, got {other:?}"),
    }

    let err = service
        .dispatch(&id, questionnaire(QuestionnaireEvent::Submit))
        .expect_err("double submit refused");
    assert!(matches!(err, TriageServiceError::Blocked(_)));
    assert_eq!(notifier.envelopes().len(), 1);
}

#[test]
fn emergency_and_cancel_are_forwarded_in_order() {
    let (service, _, notifier) = build_service();
    let id = service.start(mochi()).expect("session starts").session_id;

    for action in emergency_screening() {
        service.dispatch(&id, action).expect("action accepted");
    }
    let view = service.dispatch(&id, TriageAction::Cancel).expect("cancelled");

    assert_eq!(view.step, SessionStep::Cancelled);
    assert!(view.payload.is_none());
    assert_eq!(
        notifier.names(),
        vec!["emergency_detected", "session_cancelled"]
    );
}

#[test]
fn refused_actions_are_not_persisted() {
    let (service, _, _) = build_service();
    let id = service.start(mochi()).expect("session starts").session_id;

    let err = service
        .dispatch(&id, questionnaire(QuestionnaireEvent::Continue))
        .expect_err("questionnaire not open");
    assert!(matches!(err, TriageServiceError::Blocked(_)));

    let view = service.get(&id).expect("session stored");
    assert_eq!(view.available_actions, vec!["enter_complaint", "restart", "cancel"]);
}

#[test]
fn unknown_sessions_are_not_found() {
    let (service, _, _) = build_service();
    let err = service
        .get(&SessionId("triage-missing".to_string()))
        .expect_err("missing session");
    assert!(matches!(
        err,
        TriageServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn repository_outages_surface_as_errors() {
    let service = TriageService::with_clock(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
        clock(),
    );
    let err = service.start(mochi()).expect_err("store offline");
    assert!(matches!(
        err,
        TriageServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[test]
fn notifier_failures_surface_after_the_state_is_saved() {
    let repository = Arc::new(MemorySessions::default());
    let service =
        TriageService::with_clock(repository.clone(), Arc::new(OfflineNotifier), clock());
    let id = service.start(mochi()).expect("session starts").session_id;

    let err = service
        .dispatch(&id, TriageAction::Cancel)
        .expect_err("notifier offline");
    assert!(matches!(err, TriageServiceError::Notify(_)));
    let view = service.get(&id).expect("session stored");
    assert_eq!(view.step, SessionStep::Cancelled);
}

#[test]
fn prompts_are_released_once_and_only_for_the_current_ticket() {
    let (service, _, _) = build_service();
    let view = service.start(mochi()).expect("session starts");
    let id = view.session_id;
    let greeting = view.pending_prompt.expect("greeting queued").ticket;

    let view = service
        .dispatch(
            &id,
            screening(ScreeningEvent::EnterComplaint {
                text: "sneezing".to_string(),
            }),
        )
        .expect("complaint typed");
    assert_eq!(
        view.pending_prompt.as_ref().map(|pending| pending.ticket),
        Some(greeting)
    );

    let view = service
        .dispatch(
            &id,
            screening(ScreeningEvent::SubmitComplaint),
        )
        .expect("complaint submitted");
    let current = view.pending_prompt.expect("vitals prompt queued").ticket;

    assert!(service
        .release_prompt(&id, greeting)
        .expect("lookup works")
        .is_none());
    let prompt = service
        .release_prompt(&id, current)
        .expect("lookup works")
        .expect("current prompt released");
    assert_eq!(prompt.key, "vitals_check");
    assert!(service
        .release_prompt(&id, current)
        .expect("lookup works")
        .is_none());
}

fn drive_to_summary<R, N>(service: &TriageService<R, N>, id: &SessionId)
where
    R: SessionRepository + 'static,
    N: TriageNotifier + 'static,
{
    let mut actions = calm_screening();
    actions.extend(digestive_questionnaire());
    for action in actions {
        service.dispatch(id, action).expect("action accepted");
    }
    assert_eq!(
        service.get(id).expect("session stored").step,
        SessionStep::Questionnaire(QuestionnaireStep::Summary)
    );
}

#[test]
fn concurrent_submits_publish_a_single_payload() {
    let (service, repository, notifier) = build_service();
    let id = service.start(mochi()).expect("session starts").session_id;
    drive_to_summary(&service, &id);

    repository.hold_fetches(2);
    let (shared, session_id) = (&service, &id);
    let results: Vec<_> = std::thread::scope(|scope| {
        let submits: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(move || {
                    shared.dispatch(session_id, questionnaire(QuestionnaireEvent::Submit))
                })
            })
            .collect();
        submits
            .into_iter()
            .map(|handle| handle.join().expect("submit thread"))
            .collect()
    });
    repository.release_fetches();

    let accepted = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results.iter().any(|result| matches!(
        result,
        Err(TriageServiceError::Repository(RepositoryError::Conflict))
    )));
    assert_eq!(notifier.names(), vec!["assessment_completed"]);
    assert_eq!(
        service.get(&id).expect("session stored").step,
        SessionStep::Submitted
    );
}

#[test]
fn writes_from_an_outdated_copy_are_refused() {
    let (service, repository, _) = build_service();
    let id = service.start(mochi()).expect("session starts").session_id;

    let mut stale = repository
        .fetch(&id)
        .expect("store online")
        .expect("session stored");
    service
        .dispatch(
            &id,
            screening(ScreeningEvent::EnterComplaint {
                text: "not eating".to_string(),
            }),
        )
        .expect("complaint typed");

    stale
        .dispatch(TriageAction::Cancel, now())
        .expect("cancel accepted locally");
    let err = repository.update(stale).expect_err("stale copy");
    assert!(matches!(err, RepositoryError::Conflict));
    assert_ne!(
        service.get(&id).expect("session stored").step,
        SessionStep::Cancelled
    );
}
