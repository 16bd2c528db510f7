//! Destination sites and the selection model.
//!
//! A [`Site`] is immutable once fetched. [`SiteList`] preserves server order
//! and is only ever replaced wholesale or cleared, never mutated in place.
//! [`SelectionState`] records which site the user picked; it may outlive a
//! refresh of the underlying list.

use serde::{Deserialize, Serialize};

/// A destination site the user can publish to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Server-assigned site identifier.
    #[serde(alias = "ID")]
    pub id: u64,
    /// Display name, may be absent or empty for unnamed sites.
    #[serde(default)]
    pub name: Option<String>,
    /// Site URL.
    #[serde(alias = "URL")]
    pub url: String,
    /// Icon image URL (rendering detail, unused by the core flow).
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl Site {
    /// Name shown in the site list: the display name when non-empty,
    /// otherwise the host portion of the site URL.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            if !name.trim().is_empty() {
                return name.clone();
            }
        }
        host_portion(&self.url)
    }
}

/// Extract the host from a URL without pulling in a full URL parser.
/// Falls back to the input string when it has no recognizable host.
pub(crate) fn host_portion(url: &str) -> String {
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let host = without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme);
    if host.is_empty() {
        url.to_string()
    } else {
        host.to_string()
    }
}

/// Ordered collection of candidate sites, in server order.
///
/// `loaded` distinguishes "fetch completed with zero sites" from
/// "never fetched": a reload only hits the network in the latter case.
#[derive(Debug, Default)]
pub struct SiteList {
    sites: Vec<Site>,
    loaded: bool,
}

impl SiteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a freshly fetched sequence.
    pub fn replace(&mut self, sites: Vec<Site>) {
        self.sites = sites;
        self.loaded = true;
    }

    /// Drop all sites and mark the list as not loaded, forcing the next
    /// reload to hit the network.
    pub fn clear(&mut self) {
        self.sites.clear();
        self.loaded = false;
    }

    /// Whether a fetch has completed since the last clear.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn get(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// Index of the site with the given id, if present.
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.sites.iter().position(|s| s.id == id)
    }
}

/// The user's current pick. Created at screen entry (possibly pre-filled
/// from the last-used site) and dropped at dismissal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_site_id: Option<u64>,
    pub selected_site_name: Option<String>,
}

impl SelectionState {
    /// Point the selection at the given site.
    pub fn select(&mut self, site: &Site) {
        self.selected_site_id = Some(site.id);
        self.selected_site_name = Some(site.display_name());
    }

    pub fn is_set(&self) -> bool {
        self.selected_site_id.is_some()
    }
}
