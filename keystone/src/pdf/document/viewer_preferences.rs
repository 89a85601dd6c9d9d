use crate::pdf::{get_direct_data_nullable, maybe_ref::from_dictionary, Dictionary, Name, SchemaError};

const K_HIDE_TOOLBAR: &[u8] = b"HideToolbar";
const K_HIDE_MENUBAR: &[u8] = b"HideMenubar";
const K_HIDE_WINDOW_UI: &[u8] = b"HideWindowUI";
const K_FIT_WINDOW: &[u8] = b"FitWindow";
const K_CENTER_WINDOW: &[u8] = b"CenterWindow";
const K_DISPLAY_DOC_TITLE: &[u8] = b"DisplayDocTitle";
const K_NON_FULL_SCREEN_PAGE_MODE: &[u8] = b"NonFullScreenPageMode";
const K_DIRECTION: &[u8] = b"Direction";
const K_VIEW_AREA: &[u8] = b"ViewArea";
const K_VIEW_CLIP: &[u8] = b"ViewClip";
const K_PRINT_AREA: &[u8] = b"PrintArea";
const K_PRINT_CLIP: &[u8] = b"PrintClip";
const K_PRINT_SCALING: &[u8] = b"PrintScaling";
const K_DUPLEX: &[u8] = b"Duplex";
const K_PICK_TRAY_BY_PDF_SIZE: &[u8] = b"PickTrayByPDFSize";
const K_PRINT_PAGE_RANGE: &[u8] = b"PrintPageRange";
const K_NUM_COPIES: &[u8] = b"NumCopies";
const K_ENFORCE: &[u8] = b"Enforce";

name_enum! {
    /// Page mode after leaving full-screen mode.
    NonFullScreenPageMode {
        UseNone,
        UseOutlines,
        UseThumbs,
        UseOC,
    }
}

name_enum! {
    /// Predominant logical content order for text.
    Direction {
        L2R,
        R2L,
    }
}

name_enum! {
    /// Paper handling when printing.
    Duplex {
        Simplex,
        DuplexFlipShortEdge,
        DuplexFlipLongEdge,
    }
}

name_enum! {
    /// Viewer preferences that must not be overridden by the user.
    ViewerPreferenceEnforce {
        PrintScaling,
    }
}

/// How the document is presented on screen and when printed.
///
/// Every entry is optional and must be direct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerPreferences {
    pub hide_toolbar: Option<bool>,
    pub hide_menubar: Option<bool>,
    pub hide_window_ui: Option<bool>,
    pub fit_window: Option<bool>,
    pub center_window: Option<bool>,
    pub display_doc_title: Option<bool>,
    pub non_full_screen_page_mode: Option<NonFullScreenPageMode>,
    pub direction: Option<Direction>,
    pub view_area: Option<Name>,
    pub view_clip: Option<Name>,
    pub print_area: Option<Name>,
    pub print_clip: Option<Name>,
    pub print_scaling: Option<Name>,
    pub duplex: Option<Duplex>,
    pub pick_tray_by_pdf_size: Option<bool>,
    /// Pairs of first and last page of the ranges to print.
    pub print_page_range: Option<Vec<i64>>,
    pub num_copies: Option<i64>,
    pub enforce: Option<Vec<ViewerPreferenceEnforce>>,
}

impl TryFrom<&Dictionary> for ViewerPreferences {
    type Error = SchemaError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        Ok(Self {
            hide_toolbar: get_direct_data_nullable(dict, K_HIDE_TOOLBAR)?,
            hide_menubar: get_direct_data_nullable(dict, K_HIDE_MENUBAR)?,
            hide_window_ui: get_direct_data_nullable(dict, K_HIDE_WINDOW_UI)?,
            fit_window: get_direct_data_nullable(dict, K_FIT_WINDOW)?,
            center_window: get_direct_data_nullable(dict, K_CENTER_WINDOW)?,
            display_doc_title: get_direct_data_nullable(dict, K_DISPLAY_DOC_TITLE)?,
            non_full_screen_page_mode: get_direct_data_nullable(dict, K_NON_FULL_SCREEN_PAGE_MODE)?,
            direction: get_direct_data_nullable(dict, K_DIRECTION)?,
            view_area: get_direct_data_nullable(dict, K_VIEW_AREA)?,
            view_clip: get_direct_data_nullable(dict, K_VIEW_CLIP)?,
            print_area: get_direct_data_nullable(dict, K_PRINT_AREA)?,
            print_clip: get_direct_data_nullable(dict, K_PRINT_CLIP)?,
            print_scaling: get_direct_data_nullable(dict, K_PRINT_SCALING)?,
            duplex: get_direct_data_nullable(dict, K_DUPLEX)?,
            pick_tray_by_pdf_size: get_direct_data_nullable(dict, K_PICK_TRAY_BY_PDF_SIZE)?,
            print_page_range: get_direct_data_nullable(dict, K_PRINT_PAGE_RANGE)?,
            num_copies: get_direct_data_nullable(dict, K_NUM_COPIES)?,
            enforce: get_direct_data_nullable(dict, K_ENFORCE)?,
        })
    }
}

from_dictionary!(ViewerPreferences);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cursor::MemoryCursor, parse::Parser};

    fn dict(input: &[u8]) -> Dictionary {
        Parser::new(MemoryCursor::new(input)).read_dictionary().unwrap()
    }

    #[test]
    fn test_viewer_preferences() {
        let prefs = ViewerPreferences::try_from(&dict(
            b"<< /HideToolbar true /FitWindow false /NonFullScreenPageMode /UseThumbs
                 /Direction /L2R /PrintScaling /None /Duplex /DuplexFlipLongEdge
                 /PrintPageRange [1 3 7 9] /NumCopies 2 /Enforce [/PrintScaling] >>",
        ))
        .unwrap();

        assert_eq!(prefs.hide_toolbar, Some(true));
        assert_eq!(prefs.fit_window, Some(false));
        assert_eq!(prefs.hide_menubar, None);
        assert_eq!(prefs.non_full_screen_page_mode, Some(NonFullScreenPageMode::UseThumbs));
        assert_eq!(prefs.direction, Some(Direction::L2R));
        assert_eq!(prefs.print_scaling, Some(Name::from("None")));
        assert_eq!(prefs.duplex, Some(Duplex::DuplexFlipLongEdge));
        assert_eq!(prefs.print_page_range, Some(vec![1, 3, 7, 9]));
        assert_eq!(prefs.num_copies, Some(2));
        assert_eq!(prefs.enforce, Some(vec![ViewerPreferenceEnforce::PrintScaling]));
    }

    #[test]
    fn test_empty_viewer_preferences() {
        assert_eq!(
            ViewerPreferences::try_from(&Dictionary::default()),
            Ok(ViewerPreferences::default())
        );
    }

    #[test]
    fn test_invalid_viewer_preferences() {
        assert!(matches!(
            ViewerPreferences::try_from(&dict(b"<< /PrintPageRange [1 (2)] >>")),
            Err(SchemaError::InvalidField { ref key, .. }) if key == "PrintPageRange"
        ));
        assert!(matches!(
            ViewerPreferences::try_from(&dict(b"<< /Enforce [/Duplex] >>")),
            Err(SchemaError::InvalidField { ref key, .. }) if key == "Enforce"
        ));
        assert!(matches!(
            ViewerPreferences::try_from(&dict(b"<< /HideToolbar 1 >>")),
            Err(SchemaError::InvalidField { ref key, .. }) if key == "HideToolbar"
        ));
        assert!(matches!(
            ViewerPreferences::try_from(&dict(b"<< /Duplex /Both >>")),
            Err(SchemaError::InvalidField { ref key, .. }) if key == "Duplex"
        ));
    }
}
