//! Traversal controller - the crawl engine
//!
//! This module owns the frontier queue and the visited set and drives the
//! per-page pipeline: politeness delay, fetch, content extraction, PDF
//! extraction, text cleaning, and link discovery. It is the only stateful
//! component; the fetcher, extractor, cleaner, and PDF extractor are pure
//! services invoked per page.
//!
//! The traversal is breadth-first over an explicit queue, so crawl depth is
//! bounded by configuration rather than by the call stack, and the visited
//! set makes link cycles terminate structurally: every URL is fetched at
//! most once per run, no matter what the link graph looks like.

use crate::config::CrawlerConfig;
use crate::crawler::cleaner::clean;
use crate::crawler::extractor::{extract_content, PdfRef};
use crate::crawler::fetcher::{fetch_bytes, fetch_page};
use crate::crawler::pdf::{extract_pdf_text, PdfSkipReason};
use crate::output::log::RunLog;
use crate::record::{PageRecord, SkipReason, SkipRecord};
use crate::url::{is_in_domain, normalize_url};
use rand::Rng;
use reqwest::Client;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// A frontier entry: a normalized URL and its discovery depth
#[derive(Debug, Clone)]
struct FrontierEntry {
    url: String,
    depth: u32,
}

/// What happened to a PDF resource, cached per run so a PDF linked from
/// several pages is fetched and classified at most once
enum PdfOutcome {
    Text(String),
    NoText,
    Skipped,
}

/// The result of a complete crawl: the dataset records in breadth-first
/// discovery order, plus the audit trail of everything skipped
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub records: Vec<PageRecord>,
    pub skips: Vec<SkipRecord>,
}

/// Owns all traversal state for one run
///
/// The frontier and the visited set are exclusive to this struct and live
/// only for the duration of [`Controller::crawl`]; nothing persists across
/// runs.
pub struct Controller {
    config: CrawlerConfig,
    client: Client,
    frontier: VecDeque<FrontierEntry>,
    /// URLs ever enqueued; prevents a URL from entering the frontier twice
    enqueued: HashSet<String>,
    /// URLs dequeued for processing; marked before fetch so no URL is
    /// fetched more than once per run, even under retry
    visited: HashSet<String>,
    pdf_results: HashMap<String, PdfOutcome>,
    fetches: u64,
}

impl Controller {
    pub fn new(config: CrawlerConfig, client: Client) -> Self {
        Self {
            config,
            client,
            frontier: VecDeque::new(),
            enqueued: HashSet::new(),
            visited: HashSet::new(),
            pdf_results: HashMap::new(),
            fetches: 0,
        }
    }

    /// Runs the breadth-first traversal from the configured start URL
    ///
    /// Per dequeued entry:
    /// 1. Skip as `duplicate` if already visited, else mark visited
    /// 2. Skip as `out_of_domain` if outside the domain prefix
    /// 3. Fetch (with the politeness delay), extract, clean
    /// 4. Enqueue in-domain links at `depth + 1` while `depth < max_depth`
    ///
    /// Every skip is logged with its reason code; no per-page failure
    /// aborts the traversal.
    pub async fn crawl(&mut self, log: &mut RunLog) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();

        let start = match normalize_url(&self.config.start_url) {
            Ok(url) => url.to_string(),
            Err(e) => {
                // Config validation rejects this before a run begins
                tracing::error!("Invalid start URL {}: {}", self.config.start_url, e);
                return outcome;
            }
        };

        self.enqueued.insert(start.clone());
        self.frontier.push_back(FrontierEntry {
            url: start,
            depth: 0,
        });

        while let Some(entry) = self.frontier.pop_front() {
            self.process_entry(entry, &mut outcome, log).await;
        }

        outcome
    }

    async fn process_entry(
        &mut self,
        entry: FrontierEntry,
        outcome: &mut CrawlOutcome,
        log: &mut RunLog,
    ) {
        let url_str = entry.url.as_str();

        if self.visited.contains(url_str) {
            self.skip(outcome, log, url_str, SkipReason::Duplicate);
            return;
        }

        let url = match Url::parse(url_str) {
            Ok(u) => u,
            Err(_) => {
                self.skip(outcome, log, url_str, SkipReason::ParseError);
                return;
            }
        };

        if !is_in_domain(&url, &self.config.domain_prefix) {
            self.skip(outcome, log, url_str, SkipReason::OutOfDomain);
            return;
        }

        // Marked before the fetch: retries inside the fetcher can never
        // cause a second visit to the same URL
        self.visited.insert(entry.url.clone());

        log.visit(url_str, entry.depth);

        self.politeness_delay().await;
        let raw = match fetch_page(&self.client, url_str, self.config.retry_count).await {
            Ok(raw) => raw,
            Err(error) => {
                log.fetch_error(&error.to_string());
                let reason = if error.is_timeout() {
                    SkipReason::Timeout
                } else {
                    SkipReason::HttpError
                };
                self.skip(outcome, log, url_str, reason);
                return;
            }
        };

        if !raw.content_type.is_empty() && !raw.content_type.contains("text/html") {
            self.skip(outcome, log, url_str, SkipReason::ParseError);
            return;
        }

        if raw.body.trim().is_empty() {
            self.skip(outcome, log, url_str, SkipReason::EmptyContent);
            return;
        }

        let extracted = extract_content(&raw.body, &url);
        let content = clean(&extracted.text);

        log.links_found(extracted.links.len());
        log.extraction(&extracted.title, &content);

        let pdf_text = self
            .collect_pdf_text(&extracted.pdf_refs, outcome, log)
            .await;

        outcome.records.push(PageRecord {
            url: entry.url.clone(),
            title: extracted.title,
            content,
            pdf_text,
        });

        self.discover_links(&extracted.links, entry.depth, outcome, log);
    }

    /// Applies the domain, duplicate, and depth filters to the links found
    /// on a page and enqueues the survivors at `depth + 1`
    fn discover_links(
        &mut self,
        links: &[String],
        depth: u32,
        outcome: &mut CrawlOutcome,
        log: &mut RunLog,
    ) {
        for link in links {
            let parsed = match Url::parse(link) {
                Ok(u) => u,
                Err(_) => continue,
            };

            if !is_in_domain(&parsed, &self.config.domain_prefix) {
                self.skip(outcome, log, link, SkipReason::OutOfDomain);
                continue;
            }

            if self.enqueued.contains(link) || self.visited.contains(link) {
                self.skip(outcome, log, link, SkipReason::Duplicate);
                continue;
            }

            if depth >= self.config.max_depth {
                self.skip(outcome, log, link, SkipReason::DepthExceeded);
                continue;
            }

            self.enqueued.insert(link.clone());
            self.frontier.push_back(FrontierEntry {
                url: link.clone(),
                depth: depth + 1,
            });
        }
    }

    /// Fetches and extracts every inline PDF referenced by a page,
    /// returning the joined text when any PDF yielded some
    ///
    /// Results are cached per run; a PDF seen on an earlier page reuses its
    /// text and does not produce a second skip record.
    async fn collect_pdf_text(
        &mut self,
        pdf_refs: &[PdfRef],
        outcome: &mut CrawlOutcome,
        log: &mut RunLog,
    ) -> Option<String> {
        let mut texts: Vec<String> = Vec::new();

        for pdf_ref in pdf_refs {
            if let Some(cached) = self.pdf_results.get(&pdf_ref.url) {
                if let PdfOutcome::Text(text) = cached {
                    texts.push(text.clone());
                }
                continue;
            }

            let result = self.extract_one_pdf(pdf_ref).await;
            let cached = match result {
                Ok(text) if !text.is_empty() => {
                    texts.push(text.clone());
                    PdfOutcome::Text(text)
                }
                Ok(_) => PdfOutcome::NoText,
                Err(reason) => {
                    self.skip(outcome, log, &pdf_ref.url, reason.into());
                    PdfOutcome::Skipped
                }
            };
            self.pdf_results.insert(pdf_ref.url.clone(), cached);
        }

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n\n"))
        }
    }

    async fn extract_one_pdf(&mut self, pdf_ref: &PdfRef) -> Result<String, PdfSkipReason> {
        if pdf_ref.download_only {
            return Err(PdfSkipReason::DownloadRequired);
        }

        self.politeness_delay().await;
        let resource = match fetch_bytes(&self.client, &pdf_ref.url, self.config.retry_count).await
        {
            Ok(resource) => resource,
            Err(error) => {
                // Not reachable inline; getting it would need a separate
                // download step
                tracing::warn!("PDF fetch failed for {}: {}", pdf_ref.url, error);
                return Err(PdfSkipReason::DownloadRequired);
            }
        };

        if resource.content_disposition.contains("attachment") {
            return Err(PdfSkipReason::DownloadRequired);
        }

        extract_pdf_text(&resource.bytes)
    }

    /// Sleeps for a uniformly random duration in the configured delay range
    ///
    /// The first fetch of the run is exempt, so the total delay count is
    /// exactly (fetches - 1) plus one per PDF resource fetch.
    async fn politeness_delay(&mut self) {
        if self.fetches > 0 {
            let millis = if self.config.delay_max_ms > self.config.delay_min_ms {
                rand::rng().random_range(self.config.delay_min_ms..=self.config.delay_max_ms)
            } else {
                self.config.delay_min_ms
            };
            if millis > 0 {
                tokio::time::sleep(Duration::from_millis(millis)).await;
            }
        }
        self.fetches += 1;
    }

    fn skip(&self, outcome: &mut CrawlOutcome, log: &mut RunLog, url: &str, reason: SkipReason) {
        log.skip(url, reason);
        outcome.skips.push(SkipRecord::new(url, reason));
    }
}
