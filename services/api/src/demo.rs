use crate::infra::{InMemorySessionRepository, RecordingNotifier};
use clap::Args;
use pet_triage::config::AppConfig;
use pet_triage::error::AppError;
use pet_triage::telemetry;
use pet_triage::triage::{
    AlertnessOption, CriticalSymptom, DurationBucket, MainConcern, PerfusionOption, Progression,
    QuestionnaireEvent, RespirationOption, ScreeningEvent, SessionId, SessionView, Severity,
    SpeciesCategory, Subject, TriageAction, TriageNotification, TriageService, TypingTimer,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

type DemoService = TriageService<InMemorySessionRepository, RecordingNotifier>;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Pet name used in the conversation
    #[arg(long, default_value = "Mochi")]
    pub(crate) name: String,
    /// Pet species; birds, fish, rabbits and small mammals get extra symptom groups
    #[arg(long, default_value = "cat")]
    pub(crate) species: String,
    /// Tick a critical symptom so the emergency path is taken
    #[arg(long)]
    pub(crate) emergency: bool,
    /// Override the configured typing delay (milliseconds)
    #[arg(long)]
    pub(crate) typing_delay_ms: Option<u64>,
    /// Answer without waiting for prompts, so pending prompts get superseded
    #[arg(long)]
    pub(crate) impatient: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let delay = args
        .typing_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.triage.typing_delay);
    let pause = if args.impatient {
        Duration::ZERO
    } else {
        delay + Duration::from_millis(50)
    };

    let notifier = Arc::new(RecordingNotifier::default());
    let service = Arc::new(TriageService::new(
        Arc::new(InMemorySessionRepository::default()),
        notifier.clone(),
    ));
    let mut timer = TypingTimer::new(delay);

    let subject = Subject {
        id: 1,
        name: args.name,
        species: args.species,
        breed: None,
        age: None,
    };
    println!(
        "Triage demo for {} ({}), typing delay {}ms",
        subject.name,
        subject.species,
        delay.as_millis()
    );

    let view = service.start(subject)?;
    let session_id = view.session_id.clone();
    schedule_prompt(&mut timer, &service, &view);
    tokio::time::sleep(pause).await;

    for action in script(args.emergency, &view.subject.species) {
        println!("owner> {}", describe(&action));
        let view = service.dispatch(&session_id, action)?;
        schedule_prompt(&mut timer, &service, &view);
        tokio::time::sleep(pause).await;
    }

    // Let the summary prompt land before printing the result.
    tokio::time::sleep(timer.delay() + Duration::from_millis(50)).await;
    timer.cancel();

    println!();
    println!("Notifications:");
    for envelope in notifier.events() {
        println!("  - {}", envelope.notification.name());
        if let TriageNotification::AssessmentCompleted(payload) = &envelope.notification {
            let rendered = serde_json::to_string_pretty(payload)
                .unwrap_or_else(|err| format!("<unserializable payload: {err}>"));
            println!();
            println!("Assessment payload:");
            println!("{rendered}");
        }
    }

    Ok(())
}

fn schedule_prompt(timer: &mut TypingTimer, service: &Arc<DemoService>, view: &SessionView) {
    let Some(pending) = view.pending_prompt.as_ref() else {
        timer.cancel();
        return;
    };

    let service = service.clone();
    let session_id: SessionId = view.session_id.clone();
    let ticket = pending.ticket;
    timer.schedule(move || match service.release_prompt(&session_id, ticket) {
        Ok(Some(prompt)) => println!("assistant> {}", prompt.text),
        Ok(None) => debug!(%session_id, ticket, "prompt superseded before delivery"),
        Err(err) => warn!(%session_id, error = %err, "prompt delivery failed"),
    });
}

fn describe(action: &TriageAction) -> String {
    match action {
        TriageAction::Screening(ScreeningEvent::EnterComplaint { text }) => format!("\"{text}\""),
        TriageAction::Screening(event) => event.name().replace('_', " "),
        TriageAction::Questionnaire(QuestionnaireEvent::SetPrimarySymptom { key, .. })
        | TriageAction::Questionnaire(QuestionnaireEvent::SetAdditionalSymptom { key, .. }) => {
            format!("ticks {key}")
        }
        TriageAction::Questionnaire(event) => event.name().replace('_', " "),
        other => other.name().to_string(),
    }
}

fn script(emergency: bool, species: &str) -> Vec<TriageAction> {
    let screening = TriageAction::Screening;
    let questionnaire = TriageAction::Questionnaire;

    let mut actions = vec![
        screening(ScreeningEvent::EnterComplaint {
            text: "Vomiting since yesterday and not eating much".to_string(),
        }),
        screening(ScreeningEvent::SubmitComplaint),
        screening(ScreeningEvent::SelectRespiration {
            option: RespirationOption::Normal,
        }),
        screening(ScreeningEvent::SelectAlertness {
            option: AlertnessOption::Quiet,
        }),
        screening(ScreeningEvent::SelectPerfusion {
            option: PerfusionOption::Normal,
        }),
    ];
    if emergency {
        actions.push(screening(ScreeningEvent::SetCriticalSymptom {
            symptom: CriticalSymptom::SuspectedPoisoning,
            checked: true,
        }));
    }
    actions.push(screening(ScreeningEvent::CompleteScreening));
    if emergency {
        actions.push(screening(ScreeningEvent::ContinueAssessment));
    }

    actions.extend([
        questionnaire(QuestionnaireEvent::SelectConcern {
            concern: MainConcern::Digestive,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SetPrimarySymptom {
            key: "vomiting".to_string(),
            selected: true,
        }),
        questionnaire(QuestionnaireEvent::SetPrimarySymptom {
            key: "loss_of_appetite".to_string(),
            selected: true,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SelectSeverity {
            severity: Severity::Moderate,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SelectDuration {
            duration: DurationBucket::OneToThreeDays,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SelectProgression {
            progression: Progression::StayingSame,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SetAdditionalSymptom {
            key: "lethargy".to_string(),
            selected: true,
        }),
    ]);

    if let Some(extra) = SpeciesCategory::from_species(species)
        .and_then(|category| category.symptoms().first())
    {
        actions.push(questionnaire(QuestionnaireEvent::SetAdditionalSymptom {
            key: extra.key.to_string(),
            selected: true,
        }));
    }

    actions.push(questionnaire(QuestionnaireEvent::FinishAdditional));
    actions.push(questionnaire(QuestionnaireEvent::Submit));
    actions
}
