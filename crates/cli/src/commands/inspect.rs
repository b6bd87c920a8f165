//! Reference summary

use anyhow::Result;
use segscore_core::{EvalConfig, Namespace};

use super::load_reference;

pub fn cmd_inspect(config: &EvalConfig, json: bool) -> Result<()> {
  let reference = load_reference(config)?;

  let trials: Vec<_> = reference
    .trial_ids()
    .map(|id| {
      let intervals = reference.trial(id).map_or(0, |t| t.intervals().len());
      let frames = reference.frames(id).map_or(0, <[_]>::len);
      (id, config.namespace_of(id), intervals, frames)
    })
    .collect();
  let left = reference.partition(Namespace::Left).names();
  let right = reference.partition(Namespace::Right).names();

  if json {
    let value = serde_json::json!({
      "reference": config.reference_path,
      "labels": reference.vocabulary().len(),
      "total_frames": reference.total_frames(),
      "left_labels": left,
      "right_labels": right,
      "trials": trials
        .iter()
        .map(|(id, namespace, intervals, frames)| serde_json::json!({
          "trial_id": id,
          "namespace": namespace,
          "intervals": intervals,
          "frames": frames,
        }))
        .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  println!("Reference: {}", config.reference_path.display());
  println!("==========\n");
  println!("Trials:       {}", reference.len());
  println!("Labels:       {}", reference.vocabulary().len());
  println!("Total frames: {}", reference.total_frames());
  println!();

  println!("Left labels ({}*):  {}", config.left_prefix, left.into_iter().collect::<Vec<_>>().join(", "));
  println!("Right labels ({}*): {}", config.right_prefix, right.into_iter().collect::<Vec<_>>().join(", "));
  println!();

  for (id, namespace, intervals, frames) in &trials {
    let side = match namespace {
      Namespace::Left => "left",
      Namespace::Right => "right",
    };
    println!("  {id:<24} {side:<5} {intervals:>6} intervals {frames:>8} frames");
  }

  Ok(())
}
