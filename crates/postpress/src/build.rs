use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use colored::{ColoredString, Colorize};
use log::{error, info, trace, warn};
use rayon::prelude::*;

use crate::{
    BuildOptions,
    content::ContentCollection,
    errors::BuildError,
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    navigation::{NavigationSpec, derive_navigation},
    page::{PageContext, RenderResult, Route},
    routing::url_to_file_path,
};

pub mod artifacts;
pub mod metadata;
pub mod options;

use metadata::BuildOutput;

/// Load the content, derive the navigation and write every page of `routes` into the output directory.
///
/// Content errors stop the build before anything is rendered. A page that fails to render is replaced by
/// the page of [`BuildOptions::error_boundary`] and the build goes on.
///
/// Unlike [`publish()`](crate::publish), this doesn't install a logger.
pub fn build_site(
    routes: &[&dyn Route],
    navigation: &NavigationSpec,
    options: &BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let build_start = Instant::now();
    let mut build_metadata = BuildOutput::new(build_start);

    if options.clean_output_dir {
        trace!(target: "build", "Cleaning {}", options.output_dir.display());
        match fs::remove_dir_all(&options.output_dir) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
    }

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    let section_format_options = FormatElapsedTimeOptions {
        sec_red_threshold: 5,
        sec_yellow_threshold: 1,
        millis_red_threshold: None,
        millis_yellow_threshold: None,
        ..Default::default()
    };

    print_title("loading content");
    let content = ContentCollection::load(&options.content)?;
    build_metadata.records = content.len();

    let navigation = derive_navigation(navigation, &content);

    if let Some(generated_dir) = &options.generated_dir {
        build_metadata.artifacts =
            artifacts::write_artifacts(generated_dir, &content, &navigation)?;
    }

    print_title("generating pages");
    let pages_start = Instant::now();

    let route_format_options = FormatElapsedTimeOptions {
        additional_fn: Some(&|msg: ColoredString| {
            let formatted_msg = format!("(+{})", msg);
            if msg.fgcolor.is_none() {
                formatted_msg.dimmed()
            } else {
                formatted_msg.into()
            }
        }),
        ..Default::default()
    };

    let jobs: Vec<(&dyn Route, String)> = routes
        .iter()
        .flat_map(|route| {
            route
                .urls(&content)
                .into_iter()
                .map(move |url| (*route, url))
        })
        .collect();

    let pages = jobs
        .par_iter()
        .map(|(route, url)| {
            let route_start = Instant::now();
            let ctx = PageContext {
                content: &content,
                navigation: &navigation,
                current_url: url,
                base_url: &options.base_url,
                markdown: &options.markdown,
            };

            let (html, fell_back) = match route.render(&ctx) {
                RenderResult::Text(html) => (html, false),
                RenderResult::Err(e) => {
                    error!(target: "pages", "{} failed to render: {}", url, e);
                    (options.error_boundary.render(&ctx, &*e), true)
                }
            };

            let file_path = url_to_file_path(url, &options.output_dir);
            write_route_file(html.as_bytes(), &file_path)?;

            info!(target: "pages", "{} -> {} {}", url, file_path.to_string_lossy().dimmed(), format_elapsed_time(route_start.elapsed(), &route_format_options));

            Ok((url.clone(), file_path, fell_back))
        })
        .collect::<Result<Vec<_>, BuildError>>()?;

    for (url, file_path, fell_back) in pages {
        build_metadata.add_page(url, file_path, fell_back);
    }

    info!(target: "pages", "{}", format!("generated {} pages in {}", build_metadata.pages.len(), format_elapsed_time(pages_start.elapsed(), &section_format_options)).bold());

    let failed = build_metadata.failed_pages().count();
    if failed > 0 {
        warn!(target: "pages", "{} pages fell back to the error page", failed);
    }

    if options.static_dir.exists() {
        let assets_start = Instant::now();
        print_title("copying static files");

        copy_recursively(
            &options.static_dir,
            &options.output_dir,
            &mut build_metadata,
        )?;

        info!(target: "build", "{}", format!("Static files copied in {}", format_elapsed_time(assets_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());
    }

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(build_start.elapsed(), &section_format_options)).bold());

    Ok(build_metadata)
}

fn copy_recursively(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    build_metadata: &mut BuildOutput,
) -> io::Result<()> {
    fs::create_dir_all(&destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let filetype = entry.file_type()?;
        let target = destination.as_ref().join(entry.file_name());
        if filetype.is_dir() {
            copy_recursively(entry.path(), target, build_metadata)?;
        } else {
            fs::copy(entry.path(), &target)?;
            build_metadata.add_static_file(target, entry.path());
        }
    }
    Ok(())
}

fn write_route_file(content: &[u8], file_path: &PathBuf) -> Result<(), BuildError> {
    let write = || -> io::Result<()> {
        if let Some(parent_dir) = file_path.parent() {
            fs::create_dir_all(parent_dir)?
        }

        fs::write(file_path, content)
    };

    write().map_err(|source| BuildError::WriteFailed {
        path: file_path.clone(),
        source,
    })
}
