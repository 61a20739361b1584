use anyhow::Context as _;
use hire_core::ExtractionRequest;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::extract::ExtractSubmitArgs;
use crate::commands::extract::status::report_progress;
use crate::output::output;

pub async fn handle(
    args: &ExtractSubmitArgs,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = build_request(args)?;
    if args.wait {
        let result = ctx
            .extraction
            .submit_and_poll(&request, |status| report_progress(status, flags))
            .await?;
        return output(&result, flags.format);
    }
    let submitted = ctx.extraction.submit(&request).await?;
    output(&submitted, flags.format)
}

fn build_request(args: &ExtractSubmitArgs) -> anyhow::Result<ExtractionRequest> {
    if let Some(url) = &args.url {
        return Ok(ExtractionRequest::Url { url: url.clone() });
    }
    let content = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read posting from {}", path.display()))?,
        (None, None) => anyhow::bail!("one of --text, --file or --url is required"),
    };
    if content.trim().is_empty() {
        anyhow::bail!("posting text is empty");
    }
    Ok(ExtractionRequest::Text { content })
}
