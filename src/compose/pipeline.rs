use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

use super::descriptor::{Content, Descriptor};
use super::options::{self, DeliveryOptions};
use super::part::Part;

/// Expand a batch of descriptors into parts, in descriptor order. A failing
/// descriptor is logged and skipped; the rest of the batch still runs.
pub fn process<I>(batch: I, defaults: &DeliveryOptions) -> Vec<Part>
where
    I: IntoIterator<Item = Descriptor>,
{
    let mut parts = Vec::new();
    for descriptor in batch {
        let kind = descriptor.content.kind().to_string();
        if let Err(err) = expand(&descriptor, defaults, &mut parts) {
            tracing::error!(kind = %kind, error = %err, "skipping attachment");
        }
    }
    parts
}

/// Expand one descriptor into `parts`. On error, parts already pushed for
/// this descriptor stay in place; in particular a missing image file leaves
/// the `cid:` reference part behind without its image.
pub fn expand(
    descriptor: &Descriptor,
    defaults: &DeliveryOptions,
    parts: &mut Vec<Part>,
) -> AppResult<()> {
    let opts = options::resolve(defaults, descriptor.options.as_ref());

    match &descriptor.content {
        Content::Text(text) => {
            parts.push(Part::Text {
                content: text.clone(),
                format: opts.text_format,
            });
            push_break(parts, &opts);
            Ok(())
        }
        Content::Tabular(table) => {
            parts.push(Part::markup(table.to_html()));
            push_break(parts, &opts);
            Ok(())
        }
        Content::File(path) => {
            let data = fs::read(path)?;
            let filename = base_name(path)?;
            let mime_type = mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string();

            parts.push(Part::File {
                filename,
                mime_type,
                data,
            });
            if opts.delete_source {
                fs::remove_file(path)?;
            }
            push_break(parts, &opts);
            Ok(())
        }
        Content::Image(path) => expand_image(path, &opts, parts),
        Content::Unrecognized(kind) => Err(AppError::UnsupportedKind(kind.clone())),
    }
}

fn expand_image(path: &Path, opts: &DeliveryOptions, parts: &mut Vec<Part>) -> AppResult<()> {
    let (content_id, subtype) = image_identity(path)?;

    // The in-body reference precedes the read and is not rolled back when the
    // read fails.
    parts.push(Part::markup(format!("<img src=\"cid:{content_id}\">")));

    let data = fs::read(path)?;

    if opts.inline && opts.append_break {
        // Spacer lands between the reference and the image part; non-inline
        // images get no spacer at all.
        parts.push(Part::Separator {
            lines: opts.break_count,
        });
    }
    if opts.delete_source {
        fs::remove_file(path)?;
    }

    parts.push(Part::Image {
        content_id,
        subtype,
        data,
        inline: opts.inline,
    });
    Ok(())
}

fn push_break(parts: &mut Vec<Part>, opts: &DeliveryOptions) {
    if opts.append_break {
        parts.push(Part::Separator {
            lines: opts.break_count,
        });
    }
}

fn base_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|value| value.to_string_lossy().to_string())
        .ok_or_else(|| {
            AppError::InvalidInput(format!("invalid attachment path: {}", path.display()))
        })
}

/// Identifier and image subtype from a path's base name. Fixed-width split:
/// identifier is the base name minus its last 4 bytes, subtype the last 3,
/// so `chart.png` gives (`chart`, `png`) while `chart.jpeg` gives
/// (`chart.`, `peg`).
fn image_identity(path: &Path) -> AppResult<(String, String)> {
    let base = base_name(path)?;
    let split = base
        .len()
        .checked_sub(4)
        .filter(|idx| base.is_char_boundary(*idx) && base.is_char_boundary(idx + 1))
        .ok_or_else(|| {
            AppError::InvalidInput(format!("image name too short for `name.ext`: {base}"))
        })?;

    Ok((base[..split].to_string(), base[split + 1..].to_string()))
}
