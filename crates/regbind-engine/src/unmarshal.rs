//! Unmarshal phase: turn a populated entry tree into target field values.
//!
//! Runs in two passes so a failure never leaves a half-written target:
//! `resolve` decodes every value and checks it against its field's type,
//! then `apply` writes the checked values in. Skipped entries are left
//! alone, so their fields keep whatever default they already had.

use regbind_codec::{decode_raw, CodecConfig, NarrowingMode};
use regbind_schema::{resolve_field, ContainerEntry, Entry, SlotError, Target, ValueEntry};
use regbind_types::ValueType;

use crate::error::{DecodeError, DecodeResult};
use crate::populate::join_path;

/// Decode a populated `entry` into `target`.
///
/// `parent_path` is the display path of the container `entry` lives in.
pub fn unmarshal(
    entry: &mut Entry,
    target: &mut dyn Target,
    config: &CodecConfig,
    parent_path: &str,
) -> DecodeResult<()> {
    resolve(entry, config, parent_path)?;
    apply(entry, target, config.narrowing, parent_path)
}

fn container_path(entry: &ContainerEntry, parent_path: &str) -> String {
    if entry.spec.embedded {
        parent_path.to_string()
    } else {
        join_path(parent_path, &entry.spec.name)
    }
}

fn resolve(entry: &mut Entry, config: &CodecConfig, parent_path: &str) -> DecodeResult<()> {
    match entry {
        Entry::Container(container) => {
            if container.skipped {
                return Ok(());
            }
            let path = container_path(container, parent_path);
            for sub in &mut container.subentries {
                resolve(sub, config, &path)?;
            }
            Ok(())
        }
        Entry::Value(value) => resolve_value(value, config, parent_path),
    }
}

fn resolve_value(entry: &mut ValueEntry, config: &CodecConfig, parent_path: &str) -> DecodeResult<()> {
    if entry.skipped {
        return Ok(());
    }
    let path = join_path(parent_path, &entry.spec.name);
    let (Some(raw), Some(value_type)) = (entry.raw.as_deref(), entry.value_type) else {
        return Err(DecodeError::MalformedTarget(format!(
            "value '{path}' was never populated"
        )));
    };

    let decoded = decode_raw(raw, value_type, config)
        .and_then(|value| entry.kind.check(&value, config.narrowing).map(|()| value))
        .map_err(|err| DecodeError::from_codec(path, value_type, err))?;
    entry.decoded = Some(decoded);
    Ok(())
}

fn apply(
    entry: &mut Entry,
    target: &mut dyn Target,
    narrowing: NarrowingMode,
    parent_path: &str,
) -> DecodeResult<()> {
    match entry {
        Entry::Container(container) => {
            if container.skipped {
                return Ok(());
            }
            let path = container_path(container, parent_path);
            let record = target
                .record()
                .map_err(|err| slot_error(&path, ValueType::NONE, err))?;
            for sub in &mut container.subentries {
                let field = resolve_field(&mut *record, &sub.spec().path)
                    .map_err(|err| slot_error(&path, ValueType::NONE, err))?;
                apply(sub, field, narrowing, &path)?;
            }
            Ok(())
        }
        Entry::Value(value) => {
            if value.skipped {
                return Ok(());
            }
            let path = join_path(parent_path, &value.spec.name);
            let value_type = value.value_type.unwrap_or(ValueType::NONE);
            let decoded = value.decoded.take().ok_or_else(|| {
                DecodeError::MalformedTarget(format!("value '{path}' was never resolved"))
            })?;
            target
                .assign(decoded, narrowing)
                .map_err(|err| slot_error(&path, value_type, err))
        }
    }
}

fn slot_error(path: &str, value_type: ValueType, err: SlotError) -> DecodeError {
    match err {
        SlotError::Codec(err) => DecodeError::from_codec(path.to_string(), value_type, err),
        other => DecodeError::MalformedTarget(format!("{path}: {other}")),
    }
}
