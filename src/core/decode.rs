//! Decoding of `squeue --json` and `scontrol show partition --json` output.
//!
//! Slurm changed the shape of several fields between releases: numbers may be
//! bare or wrapped as `{"set": true, "infinite": false, "number": n}`, job
//! states may be a string or a list of base state plus flags, and a few keys
//! were renamed. The helpers here accept every shape seen in the wild.

use serde_json::Value;

use crate::core::error::ShowqError;
use crate::core::job::{JobRecord, JobState, PartitionRecord, TimeLimit, WaitReason};

const COMPLETING_FLAG: &str = "COMPLETING";

pub fn decode_jobs(raw: &str) -> Result<Vec<JobRecord>, ShowqError> {
    let document = parse_document(raw, "squeue output")?;
    let jobs = document
        .get("jobs")
        .and_then(Value::as_array)
        .ok_or_else(|| ShowqError::MalformedOutput {
            source_name: "squeue output".to_string(),
            message: "missing \"jobs\" array".to_string(),
        })?;

    jobs.iter()
        .enumerate()
        .map(|(index, job)| decode_job(job, index))
        .collect()
}

pub fn decode_partitions(raw: &str) -> Result<Vec<PartitionRecord>, ShowqError> {
    let document = parse_document(raw, "partition output")?;
    let partitions = document
        .get("partitions")
        .and_then(Value::as_array)
        .ok_or_else(|| ShowqError::MalformedOutput {
            source_name: "partition output".to_string(),
            message: "missing \"partitions\" array".to_string(),
        })?;

    Ok(partitions
        .iter()
        .map(|partition| PartitionRecord {
            name: string_field(partition, &["name"]),
            nodes: partition_nodes(partition),
        })
        .collect())
}

fn parse_document(raw: &str, source_name: &str) -> Result<Value, ShowqError> {
    serde_json::from_str(raw).map_err(|err| ShowqError::MalformedOutput {
        source_name: source_name.to_string(),
        message: err.to_string(),
    })
}

fn decode_job(job: &Value, index: usize) -> Result<JobRecord, ShowqError> {
    let job_id = number_field(job, &["job_id"]).ok_or_else(|| ShowqError::MalformedOutput {
        source_name: "squeue output".to_string(),
        message: format!("job #{index} has no job_id"),
    })?;
    let (state, completing) = job_state(job.get("job_state"));

    Ok(JobRecord {
        job_id,
        user_id: number_field(job, &["user_id"]).unwrap_or(0) as u32,
        group_id: number_field(job, &["group_id"]).unwrap_or(0) as u32,
        account: string_field(job, &["account"]),
        qos: string_field(job, &["qos"]),
        partition: string_field(job, &["partition"]),
        reservation: string_field(job, &["reservation", "resv_name"]),
        state,
        completing,
        wait_reason: WaitReason::parse(&string_field(job, &["state_reason"])),
        submit_time: timestamp_field(job, "submit_time"),
        eligible_time: timestamp_field(job, "eligible_time"),
        start_time: timestamp_field(job, "start_time"),
        end_time: timestamp_field(job, "end_time"),
        time_limit: TimeLimit::from_minutes(number_field(job, &["time_limit"])),
        nodes: string_field(job, &["nodes"]),
        batch_host: string_field(job, &["batch_host"]),
        exit_code: exit_code(job.get("exit_code")),
        num_tasks: number_field(job, &["tasks", "num_tasks", "cpus"]).unwrap_or(0) as u32,
        priority: number_field(job, &["priority"]).unwrap_or(0),
    })
}

/// Unwraps `{"set": .., "infinite": .., "number": ..}` into its number.
/// Unset and infinite values yield `None`.
fn number_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        Value::Object(map) => {
            if map.get("infinite").and_then(Value::as_bool) == Some(true) {
                return None;
            }
            if map.get("set").and_then(Value::as_bool) == Some(false) {
                return None;
            }
            map.get("number").and_then(number_value)
        }
        _ => None,
    }
}

fn number_field(object: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(number_value)
}

fn timestamp_field(object: &Value, key: &str) -> Option<i64> {
    number_field(object, &[key])
        .filter(|secs| *secs > 0)
        .and_then(|secs| i64::try_from(secs).ok())
}

fn string_field(object: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Array(items) => items.iter().find_map(|item| item.as_str().map(String::from)),
            _ => None,
        })
        .unwrap_or_default()
}

fn job_state(value: Option<&Value>) -> (JobState, bool) {
    let names: Vec<&str> = match value {
        Some(Value::String(text)) => text.split(|c: char| c == '+' || c == ',').collect(),
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    let completing = names
        .iter()
        .any(|name| name.trim().eq_ignore_ascii_case(COMPLETING_FLAG));
    let state = names
        .iter()
        .map(|name| name.trim())
        .find(|name| !name.eq_ignore_ascii_case(COMPLETING_FLAG))
        .map(JobState::parse)
        .unwrap_or_else(|| JobState::Unknown(String::new()));

    (state, completing)
}

fn exit_code(value: Option<&Value>) -> i32 {
    let code = match value {
        Some(Value::Object(map)) => map.get("return_code").and_then(number_value),
        Some(other) => number_value(other),
        None => None,
    };
    code.and_then(|code| i32::try_from(code).ok()).unwrap_or(0)
}

fn partition_nodes(partition: &Value) -> String {
    match partition.get("nodes") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Object(map)) => map
            .get("configured")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}
