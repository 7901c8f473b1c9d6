use colored::Colorize;
use flexify_core::{Exercise, Workout, WorkoutSet};
use flexify_sync::{Level, Notification, Notifier};

/// Prints notifications as coloured terminal lines.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let line = match notification.detail {
            Some(detail) => format!("{}: {}", notification.title, detail),
            None => notification.title,
        };
        match notification.level {
            Level::Success => println!("{}", format!("✅ {line}").green()),
            Level::Error => eprintln!("{}", format!("❌ {line}").red()),
        }
    }
}

pub fn print_workouts(workouts: &[&Workout]) {
    if workouts.is_empty() {
        println!("{}", "No workouts yet".dimmed());
        return;
    }
    for workout in workouts {
        println!("{}  {}", workout.id.dimmed(), workout.name.bold());
    }
}

pub fn print_exercises(exercises: &[&Exercise]) {
    if exercises.is_empty() {
        println!("{}", "No exercises".dimmed());
        return;
    }
    for exercise in exercises {
        println!(
            "{}  {} {}",
            exercise.id.dimmed(),
            exercise.name.bold(),
            format!("({})", exercise.muscle_group).cyan()
        );
    }
}

pub fn print_sets(sets: &[WorkoutSet]) {
    if sets.is_empty() {
        println!("{}", "No sets".dimmed());
        return;
    }
    println!("{}", "Serie  Reps  Kg".bold());
    for set in sets {
        let marker = if set.is_persisted() { " " } else { "*" };
        println!(
            "{:>5}{} {:>4}  {}",
            set.serie_index, marker, set.reps, set.weight_kg
        );
    }
}
