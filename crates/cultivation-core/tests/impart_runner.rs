//! Integration tests for running the impart action against a world.

use cultivation_avatars::{AvatarRef, CultivationConfig, ImpartConfig, NewAvatar, ObservationRange};
use cultivation_core::feedback::{FeedbackSource, FixedFeedback};
use cultivation_core::runner::{ActionOutcome, RunnerError, impart};
use cultivation_core::world::World;
use cultivation_types::{Avatar, AvatarId, Feedback, Gender, Month, MonthStamp, RejectionReason};

struct Household {
    world: World,
    master: AvatarId,
    disciple: AvatarId,
}

fn household() -> Household {
    let start = MonthStamp::from_year_month(1900, Month::January).unwrap_or_default();
    let mut world = World::new(start, ObservationRange::default());
    let spawn = |name: &str, level: u32, position: (i32, i32)| NewAvatar {
        name: String::from(name),
        gender: Gender::Male,
        birth_month: MonthStamp(0),
        position,
        level,
    };
    let master = world
        .avatars
        .create_avatar(spawn("Master", 80, (0, 0)))
        .unwrap_or_default();
    let disciple = world
        .avatars
        .create_avatar(spawn("Disciple", 20, (1, 0)))
        .unwrap_or_default();
    assert!(world.relations.accept_disciple(master, disciple).is_ok());
    Household {
        world,
        master,
        disciple,
    }
}

fn run(h: &mut Household, feedback: Feedback) -> Result<ActionOutcome, RunnerError> {
    let target = AvatarRef::Id(h.disciple);
    impart(
        &mut h.world,
        &ImpartConfig::default(),
        &CultivationConfig::default(),
        h.master,
        &target,
        &mut FixedFeedback(feedback),
    )
}

fn disciple_exp(h: &Household) -> Option<(u32, u64)> {
    h.world
        .avatars
        .get(h.disciple)
        .map(|a| (a.cultivation.level, a.cultivation.exp))
}

#[test]
fn accepted_impart_grants_exp_and_logs_events() {
    let mut h = household();
    let outcome = run(&mut h, Feedback::Accept);

    assert!(
        matches!(outcome, Ok(ActionOutcome::Completed { .. })),
        "expected completion, got {outcome:?}"
    );
    let Ok(ActionOutcome::Completed { feedback, events }) = outcome else {
        return;
    };
    assert_eq!(feedback, Feedback::Accept);
    assert_eq!(events.len(), 2);
    assert_eq!(h.world.events().len(), 2);
    assert_eq!(
        h.world.events().last().map(|e| e.content.as_str()),
        Some("Disciple gained cultivation experience +2000 points")
    );
    // Level 20 -> 21 costs exactly 2000.
    assert_eq!(disciple_exp(&h), Some((21, 0)));
}

#[test]
fn rejected_impart_only_logs_opening() {
    let mut h = household();
    let outcome = run(&mut h, Feedback::Reject);

    assert!(matches!(
        outcome,
        Ok(ActionOutcome::Completed {
            feedback: Feedback::Reject,
            ref events
        }) if events.len() == 1
    ));
    assert_eq!(disciple_exp(&h), Some((20, 0)));
}

#[test]
fn cooldown_blocks_until_six_months_pass() {
    let mut h = household();
    assert!(matches!(run(&mut h, Feedback::Reject), Ok(ActionOutcome::Completed { .. })));

    for elapsed in 1..6_u32 {
        assert!(h.world.advance_month().is_ok());
        let outcome = run(&mut h, Feedback::Accept);
        let remaining = 6_u32.saturating_sub(elapsed);
        assert!(
            matches!(
                outcome,
                Ok(ActionOutcome::Rejected(RejectionReason::OnCooldown { remaining_months }))
                    if remaining_months == remaining
            ),
            "month {elapsed}: {outcome:?}"
        );
    }

    assert!(h.world.advance_month().is_ok());
    assert!(matches!(run(&mut h, Feedback::Accept), Ok(ActionOutcome::Completed { .. })));
}

#[test]
fn gate_rejection_does_not_start_cooldown() {
    let mut h = household();
    let target = AvatarRef::Id(h.master);
    let outcome = impart(
        &mut h.world,
        &ImpartConfig::default(),
        &CultivationConfig::default(),
        h.disciple,
        &target,
        &mut FixedFeedback(Feedback::Accept),
    );
    assert!(matches!(
        outcome,
        Ok(ActionOutcome::Rejected(RejectionReason::NotDownstreamJunior))
    ));
    assert!(h.world.events().is_empty());

    // The master is still free to impart.
    assert!(matches!(run(&mut h, Feedback::Accept), Ok(ActionOutcome::Completed { .. })));
}

#[test]
fn missing_initiator_is_an_error() {
    let mut h = household();
    let target = AvatarRef::Id(h.disciple);
    let outcome = impart(
        &mut h.world,
        &ImpartConfig::default(),
        &CultivationConfig::default(),
        AvatarId::new(),
        &target,
        &mut FixedFeedback(Feedback::Accept),
    );
    assert!(matches!(outcome, Err(RunnerError::Avatar { .. })));
}

#[test]
fn failed_settlement_keeps_cooldown_and_opening_event_together() {
    let mut h = household();
    if let Some(mut disciple) = h.world.avatars.get_mut(h.disciple) {
        disciple.cultivation_mut().exp = 5;
    }
    let target = AvatarRef::Id(h.disciple);
    let outcome = impart(
        &mut h.world,
        &ImpartConfig {
            exp_gain: u64::MAX,
            ..ImpartConfig::default()
        },
        &CultivationConfig::default(),
        h.master,
        &target,
        &mut FixedFeedback(Feedback::Accept),
    );

    assert!(
        matches!(outcome, Err(RunnerError::Avatar { .. })),
        "expected overflow error, got {outcome:?}"
    );
    // The attempt was spent, so its opening is on record.
    assert!(!h.world.cooldowns.is_ready(h.master, "Impart", h.world.now(), 6));
    assert_eq!(h.world.events().len(), 1);
    assert_eq!(
        h.world.events().first().map(|e| e.content.as_str()),
        Some("Master imparts cultivation knowledge to Disciple")
    );
    assert_eq!(disciple_exp(&h), Some((20, 5)));
}

#[test]
fn feedback_source_sees_both_avatars() {
    struct Recorder(Vec<(String, String)>);
    impl FeedbackSource for Recorder {
        fn feedback(
            &mut self,
            action: &'static str,
            initiator: &Avatar,
            target: &Avatar,
            options: &[Feedback],
        ) -> Feedback {
            assert_eq!(action, "Impart");
            assert_eq!(options, &[Feedback::Accept, Feedback::Reject]);
            self.0.push((initiator.name.clone(), target.name.clone()));
            Feedback::Accept
        }
    }

    let mut h = household();
    let mut recorder = Recorder(Vec::new());
    let target = AvatarRef::from("Disciple");
    let outcome = impart(
        &mut h.world,
        &ImpartConfig::default(),
        &CultivationConfig::default(),
        h.master,
        &target,
        &mut recorder,
    );
    assert!(matches!(outcome, Ok(ActionOutcome::Completed { .. })));
    assert_eq!(
        recorder.0,
        vec![(String::from("Master"), String::from("Disciple"))]
    );
}
