use std::fs;
use std::io::{self, Read};

use crate::cli::SendArgs;
use crate::compose::descriptor::{Descriptor, DescriptorBatch};
use crate::compose::markup;
use crate::compose::options::{OptionsPatch, TextFormat};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub async fn run(ctx: &AppContext, args: SendArgs) -> AppResult<()> {
    let body = read_body(&args)?;
    let descriptors = build_descriptors(&args)?;

    let mut composer = ctx.composer().await?;
    composer.add_attachments(descriptors);

    let receipt = composer
        .send(&args.to, &args.subject, &body, &args.signature)
        .await?;
    composer.close();

    let text = format!("sent message to {}", receipt.to.join(", "));
    ctx.output.emit(&text, &receipt)
}

fn read_body(args: &SendArgs) -> AppResult<String> {
    let mut selected = 0;

    if args.body.is_some() {
        selected += 1;
    }
    if args.body_file.is_some() {
        selected += 1;
    }
    if args.stdin {
        selected += 1;
    }

    if selected == 0 {
        return Err(AppError::InvalidInput(
            "missing body source; pass one of --body, --body-file, or --stdin".to_string(),
        ));
    }

    if selected > 1 {
        return Err(AppError::InvalidInput(
            "pass only one body source: --body, --body-file, or --stdin".to_string(),
        ));
    }

    if let Some(body) = &args.body {
        return Ok(body.clone());
    }

    if let Some(path) = &args.body_file {
        return Ok(fs::read_to_string(path)?);
    }

    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;
    Ok(body)
}

/// Descriptor order: manifest entries first, then --text, --attach, --image
/// in that flag order. Parts land in the message in this order.
fn build_descriptors(args: &SendArgs) -> AppResult<Vec<Descriptor>> {
    let mut descriptors = Vec::new();

    if let Some(path) = &args.manifest {
        let raw = fs::read_to_string(path)?;
        let batch: DescriptorBatch = serde_json::from_str(&raw)?;
        descriptors.extend(batch);
    }

    for text in &args.text {
        let descriptor = if args.markdown {
            Descriptor::text(markup::markdown_to_html(text)).with_options(OptionsPatch {
                text_format: Some(TextFormat::Markup),
                ..OptionsPatch::default()
            })
        } else {
            Descriptor::text(text.clone())
        };
        descriptors.push(descriptor);
    }

    for path in &args.attach {
        descriptors.push(Descriptor::file(path.clone()));
    }

    for path in &args.image {
        let mut descriptor = Descriptor::image(path.clone());
        if args.inline {
            descriptor = descriptor.with_options(OptionsPatch {
                inline: Some(true),
                ..OptionsPatch::default()
            });
        }
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}
