// ABOUTME: Progress assessment thresholds and per-goal zone-balance coaching tables
// ABOUTME: Goal-specific German coaching sentences with placeholder interpolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use velocoach_core::constants::{detraining, time_periods};
use velocoach_core::models::TrainingGoal;

/// Zone-balance thresholds and coaching sentences for one training goal.
///
/// Texts carry `{z2}` / `{z3}` / `{z5}` placeholders filled with the current
/// week's whole-number zone percentages at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalZoneTargets {
    /// Below this Z2 percentage the base is considered too thin
    pub min_z2_pct: f64,
    /// Coaching sentence for a thin aerobic base
    pub low_z2_text: String,
    /// At or above this Z2 percentage the base counts as strong
    pub strong_z2_pct: f64,
    /// Below this Z4+Z5 percentage (with a strong base) intensity is missing
    pub max_intensity_pct: f64,
    /// Coaching sentence pushing for more intensity
    pub intensity_push_text: String,
    /// Above this Z3 percentage the week is grey-zone heavy
    pub max_z3_pct: f64,
    /// Coaching sentence against grey-zone riding
    pub grey_zone_text: String,
    /// Above this Z5 percentage the week is overcooked
    pub max_z5_pct: f64,
    /// Coaching sentence against excessive Z5 time
    pub high_z5_text: String,
    /// Coaching sentence when the distribution fits the goal
    pub balanced_text: String,
}

/// Thresholds and tables for the progress assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Trailing weeks considered by the assessment
    pub assessment_weeks: usize,
    /// Days without activity constituting a significant break
    pub long_break_days: i64,
    /// Days without activity constituting a short break
    pub short_break_days: i64,
    /// Estimated FTP loss per idle week, percent
    pub ftp_loss_pct_per_week: f64,
    /// Cap on total estimated FTP loss, percent
    pub max_ftp_loss_pct: f64,
    /// FTP multiplier suggested after a short break
    pub short_break_ftp_factor: f64,
    /// EF improvement (percent) above which fitness is building
    pub ef_improvement_pct: f64,
    /// EF decline (percent) below which the trend is negative
    pub ef_decline_pct: f64,
    /// Current-to-baseline calorie ratio marking high load during an EF decline
    pub high_volume_ratio: f64,
    /// Current-to-baseline calorie ratio marking productive load at stable EF
    pub productive_volume_ratio: f64,
    /// Z3 percentage above which the global grey-zone warning fires
    pub grey_zone_warn_pct: f64,
    /// Global grey-zone warning, prepended to the goal-specific sentence
    pub grey_zone_warning: String,
    /// Z5 percentage above which the global burnout warning fires
    pub z5_warn_pct: f64,
    /// Global burnout warning, prepended to the goal-specific sentence
    pub z5_warning: String,
    /// Per-goal zone-balance tables
    pub goal_targets: HashMap<TrainingGoal, GoalZoneTargets>,
}

impl ProgressConfig {
    /// Zone targets for a goal, falling back to the general-fitness table
    #[must_use]
    pub fn targets_for(&self, goal: TrainingGoal) -> &GoalZoneTargets {
        self.goal_targets
            .get(&goal)
            .or_else(|| self.goal_targets.get(&TrainingGoal::GeneralFitness))
            .map_or(&FALLBACK_TARGETS, |targets| targets)
    }
}

// Only reachable when a deserialized config dropped the general-fitness row.
static FALLBACK_TARGETS: std::sync::LazyLock<GoalZoneTargets> =
    std::sync::LazyLock::new(general_fitness_targets);

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            assessment_weeks: time_periods::ASSESSMENT_WEEKS,
            long_break_days: time_periods::LONG_BREAK_DAYS,
            short_break_days: time_periods::SHORT_BREAK_DAYS,
            ftp_loss_pct_per_week: detraining::FTP_LOSS_PCT_PER_WEEK,
            max_ftp_loss_pct: detraining::MAX_FTP_LOSS_PCT,
            short_break_ftp_factor: detraining::SHORT_BREAK_FTP_FACTOR,
            ef_improvement_pct: 2.0,
            ef_decline_pct: 3.0,
            high_volume_ratio: 1.2,
            productive_volume_ratio: 1.1,
            grey_zone_warn_pct: 30.0,
            grey_zone_warning:
                "⚠️ **Vermeide 'Junk Miles'!** {z3}% deiner Zeit war in Zone 3 (Grey Zone)."
                    .to_owned(),
            z5_warn_pct: 20.0,
            z5_warning: "🔥 **Vorsicht, Ausbrennen droht!** {z5}% in Zone 5 ist extrem hart."
                .to_owned(),
            goal_targets: default_goal_targets(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn targets(
    min_z2: f64,
    low_z2: &str,
    strong_z2: f64,
    max_intensity: f64,
    push: &str,
    max_z3: f64,
    grey: &str,
    max_z5: f64,
    z5: &str,
    balanced: &str,
) -> GoalZoneTargets {
    GoalZoneTargets {
        min_z2_pct: min_z2,
        low_z2_text: low_z2.to_owned(),
        strong_z2_pct: strong_z2,
        max_intensity_pct: max_intensity,
        intensity_push_text: push.to_owned(),
        max_z3_pct: max_z3,
        grey_zone_text: grey.to_owned(),
        max_z5_pct: max_z5,
        high_z5_text: z5.to_owned(),
        balanced_text: balanced.to_owned(),
    }
}

fn general_fitness_targets() -> GoalZoneTargets {
    targets(
        40.0,
        "🚴 **Grundlagen-Fokus fehlt!** Nur {z2}% deiner Zeit war in Zone 2. Versuche, 1-2 ruhige Einheiten (60-90min) einzubauen, um die aerobe Basis zu stärken.",
        60.0,
        10.0,
        "⚡ **Basis ist stark, Intensität fehlt!** Du hast eine super Grundlage ({z2}% Z2). Füge jetzt 1x pro Woche Intervalle (z.B. 4x8min Z4) hinzu, um die Schwelle zu heben.",
        30.0,
        "⚠️ **Vermeide 'Junk Miles'!** {z3}% deiner Zeit war in Zone 3 (Grey Zone). Fahre entweder wirklich locker (Z2) oder gezielt hart (Z4), aber weniger dazwischen.",
        20.0,
        "🔥 **Vorsicht, Ausbrennen droht!** {z5}% in Zone 5 ist extrem hart. Reduziere die Intensität nächste Woche und fahre mehr lockere Kilometer zur Erholung.",
        "✅ **Super Balance!** Dein Mix aus Grundlage und Intensität passt gut. Behalte diesen Rhythmus bei und steigere langsam das Volumen.",
    )
}

/// The built-in goal table. Thresholds shift per goal: base-building demands
/// far more Z2 and tolerates almost no Z5, FTP and race-prep goals accept more
/// intensity before warning.
fn default_goal_targets() -> HashMap<TrainingGoal, GoalZoneTargets> {
    let mut table = HashMap::new();

    table.insert(TrainingGoal::GeneralFitness, general_fitness_targets());

    table.insert(
        TrainingGoal::WeightLoss,
        targets(
            50.0,
            "🚴 **Mehr Fettstoffwechsel-Training!** Nur {z2}% in Zone 2. Für die Gewichtsreduktion sind lange, ruhige Z2-Einheiten der effektivste Hebel.",
            65.0,
            10.0,
            "⚡ **Basis steht!** Mit {z2}% Z2 darfst du 1x pro Woche kurze Intervalle einstreuen, das kurbelt den Nachbrenneffekt an.",
            25.0,
            "⚠️ **Zu viel Zone 3 ({z3}%)!** Für die Fettverbrennung lieber länger und lockerer fahren statt mittelhart.",
            15.0,
            "🔥 **Zu viel Intensität ({z5}% Z5)!** Harte Intervalle machen hungrig und müde. Mehr ruhige Kilometer helfen dem Ziel Gewichtsreduktion.",
            "✅ **Guter Mix für die Gewichtsreduktion!** Viel Grundlage, wenig Härte. Weiter so.",
        ),
    );

    table.insert(
        TrainingGoal::IncreaseFtp,
        targets(
            30.0,
            "🚴 **Grundlage nicht vernachlässigen!** Nur {z2}% Z2. Auch für die FTP braucht es eine aerobe Basis zwischen den harten Einheiten.",
            50.0,
            15.0,
            "⚡ **Zeit für Schwellenreize!** Deine Basis steht ({z2}% Z2), aber nur wenig Z4/Z5. Plane 2x pro Woche Sweet-Spot- oder Schwellenintervalle ein.",
            30.0,
            "⚠️ **Junk Miles bremsen die FTP!** {z3}% in Zone 3. Fahre polarisiert: locker in Z2 oder gezielt hart an der Schwelle.",
            25.0,
            "🔥 **Viel Z5 ({z5}%)!** Für die FTP bringen Z4-Intervalle mehr als ständige VO2max-Spitzen. Dosiere die harten Einheiten.",
            "✅ **Struktur passt für den FTP-Aufbau!** Halte den Rhythmus aus Schwellenreizen und lockerer Grundlage.",
        ),
    );

    table.insert(
        TrainingGoal::BuildEndurance,
        targets(
            60.0,
            "🚴 **Mehr Umfang in Zone 2!** Nur {z2}% Z2. Ausdauer wächst mit langen, ruhigen Einheiten, plane 2-3 Stunden-Fahrten ein.",
            75.0,
            10.0,
            "⚡ **Starke Basis ({z2}% Z2)!** Ein lockerer Tempowechsel pro Woche darf jetzt dazukommen.",
            25.0,
            "⚠️ **Zone 3 statt Zone 2 ({z3}%)!** Fahre bewusst langsamer, die Ausdauer-Anpassung passiert im ruhigen Bereich.",
            10.0,
            "🔥 **{z5}% in Z5 passt nicht zum Ausdauer-Ziel.** Spare die Körner und verlängere stattdessen die lange Ausfahrt.",
            "✅ **Sauberes Ausdauer-Training!** Viel Z2, wenig Störfeuer. Steigere langsam die Dauer der längsten Einheit.",
        ),
    );

    table.insert(
        TrainingGoal::ImproveVo2max,
        targets(
            35.0,
            "🚴 **Erholung kommt zu kurz!** Nur {z2}% Z2. Harte VO2max-Blöcke wirken nur mit genug lockerer Fahrzeit dazwischen.",
            55.0,
            10.0,
            "⚡ **Bereit für VO2max-Intervalle!** Basis steht ({z2}% Z2). Plane 1-2x pro Woche 4x4min oder 5x3min im Z5-Bereich.",
            30.0,
            "⚠️ **{z3}% Zone 3 bringt keine VO2max-Anpassung.** Entweder ganz locker oder richtig hart, dazwischen verschenkst du Zeit.",
            30.0,
            "🔥 **{z5}% Z5 ist auch für ein VO2max-Ziel viel.** Maximal 2 harte Einheiten pro Woche, sonst droht Überlastung.",
            "✅ **Gute Polarisierung für VO2max!** Harte Spitzen, ruhige Grundlage. Genau so weitermachen.",
        ),
    );

    table.insert(
        TrainingGoal::BuildBase,
        targets(
            65.0,
            "🚴 **Basisphase heißt Zone 2!** Nur {z2}% Z2. In dieser Phase zählt fast ausschließlich ruhiges Grundlagentraining.",
            80.0,
            5.0,
            "⚡ **Basis sitzt ({z2}% Z2).** Ein kurzer Sprint-Block zum Abschluss einer Einheit ist ok, mehr braucht es jetzt nicht.",
            20.0,
            "⚠️ **{z3}% Zone 3 in der Basisphase!** Bleib diszipliniert im Z2-Bereich, auch wenn es sich zu leicht anfühlt.",
            5.0,
            "🔥 **Z5-Anteil ({z5}%) passt nicht in die Basisphase.** Intensität kommt später im Plan, jetzt ruhig bleiben.",
            "✅ **Basisphase läuft sauber!** Konsequentes Z2-Training zahlt sich in den nächsten Monaten aus.",
        ),
    );

    table.insert(
        TrainingGoal::RacePrep,
        targets(
            35.0,
            "🚴 **Auch vor dem Wettkampf braucht es Grundlage!** Nur {z2}% Z2. Locker rollen zwischen den harten Tagen.",
            55.0,
            20.0,
            "⚡ **Schärfe die Form!** Basis steht ({z2}% Z2). Jetzt wettkampfspezifische Intervalle und Tempowechsel einbauen.",
            30.0,
            "⚠️ **{z3}% Zone 3 ist zu unspezifisch.** Trainiere die Intensitäten, die dein Wettkampf verlangt, und erhole dich dazwischen richtig.",
            25.0,
            "🔥 **Hohe Z5-Last ({z5}%)!** Kurz vor dem Wettkampf lieber Qualität statt Masse, plane Entlastungstage ein.",
            "✅ **Wettkampfvorbereitung im Plan!** Die Mischung aus Spezifik und Erholung passt.",
        ),
    );

    table.insert(
        TrainingGoal::Maintenance,
        targets(
            40.0,
            "🚴 **Etwas mehr Grundlage ({z2}% Z2).** Zum Formerhalt reichen 2 ruhige Einheiten pro Woche, aber die sollten sein.",
            60.0,
            10.0,
            "⚡ **Ein Reiz pro Woche hält die Form.** Basis passt ({z2}% Z2), ein knackiges Intervall-Training pro Woche genügt.",
            30.0,
            "⚠️ **{z3}% Zone 3.** Auch beim Formerhalt gilt: lieber klar locker oder klar hart.",
            20.0,
            "🔥 **{z5}% Z5 ist mehr als Formerhalt braucht.** Reduziere auf einen harten Tag pro Woche.",
            "✅ **Form wird gehalten!** Der Mix passt, keine Änderungen nötig.",
        ),
    );

    table
}
