//! Command execution over the automation engine.
//!
//! The bridge resolves the current screen-reading session per command,
//! composes the engine primitives, and keeps every acquired node handle
//! inside the command's scope — replies carry descriptors and scalars only.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use marionette::gesture::DEFAULT_SWIPE_DURATION;
use marionette::wait::DEFAULT_WAIT_TIMEOUT;
use marionette::{
    AccessibilitySession, ActionDispatcher, AutomationError, GestureSynthesizer, GlobalAction,
    ScrollDirection, SessionRegistry, TextQuery, TreeWalker, WaitCoordinator,
};
use tokio::task;
use tracing::{debug, instrument};

use crate::command::Command;
use crate::reply::{CommandReply, ElementQueryReply, ScreenContent};

/// How a text click gets carried out once the walk resolves the target.
enum ClickResolution {
    NotFound,
    Clicked(bool),
    TapAt(f32, f32),
}

pub struct CommandBridge {
    registry: Arc<SessionRegistry>,
}

impl CommandBridge {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    #[instrument(skip(self), err)]
    pub async fn execute(&self, command: Command) -> Result<CommandReply, AutomationError> {
        match command {
            Command::IsAvailable => Ok(CommandReply::Acknowledged(
                self.registry.is_available().await,
            )),
            Command::GetScreenContent => self.screen_content().await.map(CommandReply::Screen),
            Command::FindElementByText { text, exact } => self
                .find_element(text, exact)
                .await
                .map(CommandReply::Element),
            Command::ClickOnText { text } => self
                .click_on_text(text)
                .await
                .map(CommandReply::Acknowledged),
            Command::ClickAt { x, y } => {
                let session = self.session().await?;
                let accepted = GestureSynthesizer::new(session)
                    .tap(x as f32, y as f32)
                    .await?;
                Ok(CommandReply::Acknowledged(accepted))
            }
            Command::TypeText { text } => {
                let session = self.session().await?;
                let entered = ActionDispatcher::new(session).type_into_focused(&text)?;
                Ok(CommandReply::Acknowledged(entered))
            }
            Command::Scroll { direction } => {
                self.scroll(direction).await.map(CommandReply::Acknowledged)
            }
            Command::Swipe {
                start_x,
                start_y,
                end_x,
                end_y,
                duration_ms,
            } => {
                let session = self.session().await?;
                if duration_ms == Some(0) {
                    return Err(AutomationError::InvalidArgument(
                        "swipe duration must be positive".into(),
                    ));
                }
                let duration = duration_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_SWIPE_DURATION);
                let accepted = GestureSynthesizer::new(session)
                    .swipe(
                        start_x as f32,
                        start_y as f32,
                        end_x as f32,
                        end_y as f32,
                        duration,
                    )
                    .await?;
                Ok(CommandReply::Acknowledged(accepted))
            }
            Command::PressBack => self
                .global(GlobalAction::Back)
                .await
                .map(CommandReply::Acknowledged),
            Command::PressHome => self
                .global(GlobalAction::Home)
                .await
                .map(CommandReply::Acknowledged),
            Command::GetCurrentPackage => {
                let session = self.session().await?;
                Ok(CommandReply::Package(
                    session.foreground_package().unwrap_or_default(),
                ))
            }
            Command::ExtractAllText => self.extract_all_text().await.map(CommandReply::Texts),
            Command::WaitForElement { text, timeout_ms } => self
                .wait_for_element(text, timeout_ms)
                .await
                .map(CommandReply::Acknowledged),
        }
    }

    async fn session(&self) -> Result<Arc<dyn AccessibilitySession>, AutomationError> {
        self.registry
            .current()
            .await
            .ok_or(AutomationError::Unavailable)
    }

    async fn screen_content(&self) -> Result<ScreenContent, AutomationError> {
        let session = self.session().await?;
        let package = session.foreground_package().unwrap_or_default();
        let elements = task::spawn_blocking(move || match session.active_root()? {
            Some(root) => TreeWalker::default().collect(root),
            None => Ok(Vec::new()),
        })
        .await
        .map_err(join_error)??;
        debug!(package, elements = elements.len(), "screen content built");
        Ok(ScreenContent {
            package,
            elements,
            timestamp: unix_millis(),
        })
    }

    async fn find_element(
        &self,
        text: String,
        exact: bool,
    ) -> Result<ElementQueryReply, AutomationError> {
        let session = self.session().await?;
        let query = non_empty_query(text, exact)?;
        task::spawn_blocking(move || {
            let Some(root) = session.active_root()? else {
                return Ok(ElementQueryReply::not_found());
            };
            match TreeWalker::default().find_first(root, |attrs| query.matches(attrs))? {
                Some(node) => {
                    let attrs = node.attributes();
                    Ok(ElementQueryReply::found(
                        attrs.label().to_string(),
                        attrs.bounds,
                    ))
                }
                None => Ok(ElementQueryReply::not_found()),
            }
        })
        .await
        .map_err(join_error)?
    }

    async fn click_on_text(&self, text: String) -> Result<bool, AutomationError> {
        let session = self.session().await?;
        let query = non_empty_query(text, false)?;
        let resolution = {
            let session = session.clone();
            task::spawn_blocking(move || {
                let Some(root) = session.active_root()? else {
                    return Ok(ClickResolution::NotFound);
                };
                match TreeWalker::default().find_first(root, |attrs| query.matches(attrs))? {
                    Some(node) => {
                        let attrs = node.attributes();
                        if attrs.clickable {
                            let accepted = ActionDispatcher::new(session.clone()).click(&node)?;
                            Ok(ClickResolution::Clicked(accepted))
                        } else {
                            // Not clickable itself; aim a tap at its center.
                            Ok(ClickResolution::TapAt(
                                attrs.bounds.center_x() as f32,
                                attrs.bounds.center_y() as f32,
                            ))
                        }
                    }
                    None => Ok(ClickResolution::NotFound),
                }
            })
            .await
            .map_err(join_error)??
        };
        match resolution {
            ClickResolution::NotFound => {
                debug!("no node matched the click text");
                Ok(false)
            }
            ClickResolution::Clicked(accepted) => Ok(accepted),
            ClickResolution::TapAt(x, y) => GestureSynthesizer::new(session).tap(x, y).await,
        }
    }

    async fn scroll(&self, direction: ScrollDirection) -> Result<bool, AutomationError> {
        let session = self.session().await?;
        task::spawn_blocking(move || ActionDispatcher::new(session).scroll(direction))
            .await
            .map_err(join_error)?
    }

    async fn global(&self, action: GlobalAction) -> Result<bool, AutomationError> {
        let session = self.session().await?;
        ActionDispatcher::new(session).global(action)
    }

    async fn extract_all_text(&self) -> Result<Vec<String>, AutomationError> {
        let session = self.session().await?;
        task::spawn_blocking(move || match session.active_root()? {
            Some(root) => TreeWalker::default().collect_text(root),
            None => Ok(Vec::new()),
        })
        .await
        .map_err(join_error)?
    }

    async fn wait_for_element(
        &self,
        text: String,
        timeout_ms: Option<u64>,
    ) -> Result<bool, AutomationError> {
        let session = self.session().await?;
        let query = non_empty_query(text, false)?;
        let timeout = timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WAIT_TIMEOUT);
        let hit = WaitCoordinator::new(session)
            .wait_for_match(&query, timeout)
            .await?;
        // The handle is dropped right here; only the fact of the match
        // crosses the command boundary.
        Ok(hit.is_some())
    }
}

fn non_empty_query(text: String, exact: bool) -> Result<TextQuery, AutomationError> {
    if text.is_empty() {
        return Err(AutomationError::InvalidArgument(
            "search text must not be empty".into(),
        ));
    }
    Ok(TextQuery { text, exact })
}

fn join_error(err: task::JoinError) -> AutomationError {
    AutomationError::internal_with_detail("worker task failed", err.to_string())
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
