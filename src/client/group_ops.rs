use crate::commands::{self, GroupInfo};
use crate::{NntpError, Result, codes};
use tracing::debug;

use super::state::GroupContext;
use super::{NntpClient, NntpIo};

impl<S: NntpIo> NntpClient<S> {
    /// Select a newsgroup
    ///
    /// Returns [`GroupInfo`] with the estimated article count and watermarks.
    /// The current article pointer moves to the low watermark, or is cleared
    /// for an empty group.
    ///
    /// # Errors
    ///
    /// - [`NntpError::NoSuchGroup`] - The newsgroup does not exist
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::InvalidResponse`] - Could not parse the server response
    pub async fn group(&mut self, newsgroup: &str) -> Result<GroupInfo> {
        debug!("Selecting newsgroup: {}", newsgroup);

        let response = self.command(&commands::group(newsgroup)).await?;
        if response.code == codes::NO_SUCH_GROUP {
            return Err(NntpError::NoSuchGroup(newsgroup.to_string()));
        }

        let info = commands::parse_group_response(response, newsgroup)?;
        debug!(
            "Group {} selected: {} articles ({}-{})",
            info.name, info.count, info.low, info.high
        );

        let current = (info.count > 0).then_some(info.low);
        self.group = Some(GroupContext {
            info: info.clone(),
            current,
        });
        Ok(info)
    }

    /// The currently selected newsgroup, if any
    pub fn current_group(&self) -> Option<&GroupInfo> {
        self.group.as_ref().map(|g| &g.info)
    }

    /// The current article number within the selected group, if any
    pub fn current_article(&self) -> Option<u64> {
        self.group.as_ref().and_then(|g| g.current)
    }

    pub(super) fn set_current_article(&mut self, number: u64) {
        if let Some(group) = self.group.as_mut() {
            group.current = Some(number);
        }
    }
}
