//! Formatted terminal output for training runs.
//!
//! Formatting lives here so the pipeline stays free of presentation concerns.

use crate::app::pipeline::TrainingRun;
use crate::domain::TrainConfig;

/// Format the training summary (dataset, split, fit diagnostics, artifacts).
pub fn format_training_summary(run: &TrainingRun, config: &TrainConfig) -> String {
    let mut out = String::new();
    let scaler = &run.artifact.scaler;
    let model = &run.artifact.classifier;

    out.push_str("=== altcredit - logistic credit model ===\n");
    out.push_str(&format!("Data: {}\n", config.data_path.display()));
    out.push_str(&format!(
        "Rows: n={} | good={} | bad={}\n",
        run.rows, run.label_counts.0, run.label_counts.1
    ));
    out.push_str(&format!(
        "Split: train={} | test={} | seed={}\n",
        run.n_train, run.n_test, config.seed
    ));

    out.push_str("\nFeatures:\n");
    out.push_str(&format!(
        "{:<16} {:>12} {:>12} {:>10} {:>8}\n",
        "name", "mean", "scale", "weight", "imputed"
    ));
    out.push_str(&format!("{:-<16} {:-<12} {:-<12} {:-<10} {:-<8}\n", "", "", "", "", ""));
    for (j, name) in scaler.feature_names.iter().enumerate() {
        out.push_str(&format!(
            "{:<16} {:>12.3} {:>12.3} {:>10.4} {:>8}\n",
            name,
            scaler.mean[j],
            scaler.scale[j],
            model.weights.get(j).copied().unwrap_or(f64::NAN),
            run.imputed.get(j).copied().unwrap_or(0),
        ));
    }

    out.push_str(&format!("\nIntercept: {:.4}\n", model.bias));
    out.push_str(&format!(
        "Solver: newton | C={} | iterations={} | converged={}\n",
        model.c, model.n_iter, model.converged
    ));
    out.push_str(&format!("Accuracy (train): {:.2}\n", run.train_accuracy));
    out.push_str(&format!("Model trained. Accuracy on test set: {:.2}\n", run.test_accuracy));
    out.push_str(&format!(
        "\nModel and scaler saved as {} and {}.\n",
        config.model_path.display(),
        config.scaler_path.display()
    ));

    out
}
