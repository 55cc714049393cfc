//! Bucket commands

use std::io::{BufRead, Write};

use anyhow::Result;
use gcs_client::{CorsDefaults, CorsRule, LocationConstraint, MaxAge, Storage};

use super::{blank_to_none, print_body, ACL_PROMPT, BUCKET_PROMPT};
use crate::input::Prompter;

/// Get all buckets
pub async fn get_buckets(client: &dyn Storage) -> Result<()> {
    let body = client.get_buckets().await?;
    print_body(&body);
    Ok(())
}

/// Get a bucket
pub async fn get_bucket<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let body = client.get_bucket(&bucket).await?;
    print_body(&body);
    Ok(())
}

/// Get bucket CORS
pub async fn get_bucket_cors<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let body = client.get_bucket_cors(&bucket).await?;
    print_body(&body);
    Ok(())
}

/// Get bucket location
pub async fn get_bucket_location<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let body = client.get_bucket_location(&bucket).await?;
    print_body(&body);
    Ok(())
}

/// Create a bucket, optionally with a canned ACL and a location
/// constraint. Anything other than US or EU means no constraint.
pub async fn insert_bucket<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let acl = prompter.optional(ACL_PROMPT, "private")?;
    let location = prompter.optional("a location constraint (US or EU)", "none")?;

    client
        .insert_bucket(
            &bucket,
            blank_to_none(&acl),
            LocationConstraint::parse(&location),
        )
        .await?;
    println!("Bucket \"{}\" created", bucket);
    Ok(())
}

/// Set bucket CORS
pub async fn set_bucket_cors<R: BufRead, W: Write>(
    client: &dyn Storage,
    defaults: &CorsDefaults,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    let origins = prompter.list("a comma-separated list of origins", &defaults.origin)?;
    let methods = prompter.list("a comma-separated list of methods", &defaults.method)?;
    let response_headers =
        prompter.list("a comma-separated list of headers", &defaults.response_header)?;
    let age = prompter.optional("max cache time in seconds", &defaults.max_age_sec.to_string())?;

    let rule = CorsRule {
        origins,
        methods,
        response_headers,
        max_age_sec: max_age_entry(age),
    };
    client.set_bucket_cors(&bucket, &rule).await?;
    println!("Cors set successfully");
    Ok(())
}

/// Delete a bucket
pub async fn delete_bucket<R: BufRead, W: Write>(
    client: &dyn Storage,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let bucket = prompter.required(BUCKET_PROMPT)?;
    client.delete_bucket(&bucket).await?;
    println!("{} deleted.", bucket);
    Ok(())
}

/// Max-age as entered: blank takes the configured default, anything else
/// is emitted verbatim
fn max_age_entry(entry: String) -> Option<MaxAge> {
    if entry.is_empty() {
        None
    } else {
        Some(MaxAge::Text(entry))
    }
}
