//! Portal URL templates, one per artifact category.

use vbpl_core::{Category, ItemId};

/// Builds the page URLs for a document.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
    dvid: u32,
}

impl Endpoints {
    pub fn new(base: &str, dvid: u32) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            dvid,
        }
    }

    /// URL of the page rendered for `category`.
    ///
    /// For [`Category::Pdf`] this is the viewer page that embeds the
    /// document, not the document itself.
    pub fn url_for(&self, category: Category, id: &ItemId) -> String {
        let (base, dvid) = (&self.base, self.dvid);
        match category {
            Category::FullText => {
                format!("{base}/TW/Pages/vbpq-toanvan.aspx?ItemID={id}&Keyword=")
            }
            Category::Property => {
                format!("{base}/tw/Pages/vbpq-thuoctinh.aspx?dvid={dvid}&ItemID={id}&Keyword=")
            }
            Category::History => {
                format!("{base}/tw/Pages/vbpq-lichsu.aspx?dvid={dvid}&ItemID={id}&Keyword=")
            }
            Category::Related => {
                format!("{base}/TW/Pages/vbpq-vanbanlienquan.aspx?ItemID={id}&Keyword=")
            }
            Category::Pdf => {
                format!("{base}/TW/Pages/vbpq-van-ban-goc.aspx?dvid={dvid}&ItemID={id}")
            }
        }
    }
}
