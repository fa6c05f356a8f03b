//! Autoscale formula construction.
//!
//! The formula is text in the Batch service's own expression language,
//! evaluated remotely every [`AUTOSCALE_EVALUATION_INTERVAL`]. Nothing here
//! is executed locally; the only local input is the pool-size cap.

/// ISO-8601 interval between service-side formula evaluations.
pub const AUTOSCALE_EVALUATION_INTERVAL: &str = "PT5M";

/// Render the autoscale formula with `node_cap` as the pool-size ceiling.
///
/// Sampled pending tasks drive the target: if fewer than 70% of the
/// 5-minute window's samples are present only the latest sample is used,
/// otherwise the max of the latest sample and the window average. With no
/// pending tasks the target decays to half the current dedicated nodes.
/// The `min` clause caps the result at `node_cap` regardless of samples,
/// and nodes are only deallocated once their running task completes.
pub fn autoscale_formula(node_cap: u32) -> String {
    format!(
        "// Pending tasks sampled over the last 5 minutes.\n\
         $samples = $ActiveTasks.GetSamplePercent(TimeInterval_Minute * 5);\n\
         $tasks = $samples < 70 ? max(0, $ActiveTasks.GetSample(1)) : \
         max($ActiveTasks.GetSample(1), avg($ActiveTasks.GetSample(TimeInterval_Minute * 5)));\n\
         $targetVMs = $tasks > 0 ? $tasks : max(0, $TargetDedicatedNodes / 2);\n\
         cappedPoolSize = {node_cap};\n\
         $TargetLowPriorityNodes = max(0, min($targetVMs, cappedPoolSize));\n\
         // Drain nodes instead of killing their running task.\n\
         $NodeDeallocationOption = taskcompletion;"
    )
}
