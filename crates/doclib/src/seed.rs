//! Startup seed data
//!
//! The default seed reproduces the library's launch catalogue: six subject
//! folders and eight approved sample PDFs hosted on Google Drive.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::{DocumentStatus, NewDocument, NewFolder};
use crate::store::StoreState;

/// A pre-approved document with its historical counters
#[derive(Debug, Clone)]
pub struct SeedDocument {
    pub document: NewDocument,
    pub download_count: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Initial store contents. Folders receive ids 1..=n in order, so seed
/// documents and child folders may refer to them by position.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub folders: Vec<NewFolder>,
    pub documents: Vec<SeedDocument>,
}

const UPLOADER: &str = "Admin";

fn drive_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}

impl Seed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Default folders and sample documents. Download counts and upload
    /// dates are randomized within the last 30 days.
    pub fn defaults() -> Self {
        let folders = vec![
            NewFolder::new("Giáo dục").with_external_ref("education"),
            NewFolder::new("Toán học")
                .with_parent(1)
                .with_external_ref("math"),
            NewFolder::new("Vật lý")
                .with_parent(1)
                .with_external_ref("physics"),
            NewFolder::new("Công nghệ").with_external_ref("technology"),
            NewFolder::new("Kinh doanh").with_external_ref("business"),
            NewFolder::new("Y tế").with_external_ref("health"),
        ];

        // (title, description, file name, size, pages, drive id, folder, favorite)
        let samples: [(&str, &str, &str, u64, u32, &str, i64, bool); 8] = [
            (
                "Giáo Trình Toán Học Cơ Bản",
                "Tài liệu học tập toán học dành cho học sinh cấp 2 và cấp 3",
                "giao-trinh-toan-hoc-co-ban.pdf",
                2_547_832,
                145,
                "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms",
                2,
                true,
            ),
            (
                "Công Thức Vật Lý Tổng Hợp",
                "Tuyển tập các công thức vật lý quan trọng cho kỳ thi",
                "cong-thuc-vat-ly-tong-hop.pdf",
                1_832_156,
                89,
                "1AdGjKvBdBZjgmUUqptlbs74OgvE2upms2",
                3,
                false,
            ),
            (
                "Hướng Dẫn Lập Trình Python",
                "Tài liệu hướng dẫn từ cơ bản đến nâng cao về Python",
                "huong-dan-lap-trinh-python.pdf",
                3_421_875,
                234,
                "1BdBZjgmUUqptlbs74OgvE2upms3",
                4,
                true,
            ),
            (
                "Quản Lý Dự Án Phần Mềm",
                "Phương pháp quản lý dự án trong phát triển phần mềm",
                "quan-ly-du-an-phan-mem.pdf",
                2_156_743,
                167,
                "1UUqptlbs74OgvE2upms4",
                4,
                false,
            ),
            (
                "Kế Hoạch Kinh Doanh Hiệu Quả",
                "Hướng dẫn lập kế hoạch kinh doanh cho start-up",
                "ke-hoach-kinh-doanh-hieu-qua.pdf",
                1_987_654,
                123,
                "1bs74OgvE2upms5",
                5,
                false,
            ),
            (
                "Y Học Cơ Sở - Tập 1",
                "Giáo trình y học cơ sở dành cho sinh viên năm nhất",
                "y-hoc-co-so-tap-1.pdf",
                4_523_198,
                298,
                "174OgvE2upms6",
                6,
                true,
            ),
            (
                "Tiếng Anh Giao Tiếp Cơ Bản",
                "Tài liệu học tiếng Anh giao tiếp hàng ngày",
                "tieng-anh-giao-tiep-co-ban.pdf",
                2_789_432,
                156,
                "1OgvE2upms7",
                1,
                false,
            ),
            (
                "Đại Số Tuyến Tính",
                "Giáo trình đại số tuyến tính cho sinh viên đại học",
                "dai-so-tuyen-tinh.pdf",
                3_156_789,
                201,
                "1vE2upms8",
                2,
                true,
            ),
        ];

        let mut rng = rand::rng();
        let now = Utc::now();
        let documents = samples
            .into_iter()
            .map(
                |(title, description, file_name, size, pages, drive_id, folder, favorite)| {
                    let mut document = NewDocument::new(title, file_name, size, drive_id)
                        .with_description(description)
                        .with_page_count(pages)
                        .with_download_url(drive_view_url(drive_id))
                        .with_folder(folder)
                        .with_uploader_name(UPLOADER);
                    document.is_favorite = favorite;
                    SeedDocument {
                        document,
                        download_count: rng.random_range(0..50),
                        uploaded_at: now - Duration::days(rng.random_range(0..30)),
                    }
                },
            )
            .collect();

        Self { folders, documents }
    }

    /// Insert the seed into an empty state and recompute folder counts
    pub(crate) fn apply(self, state: &mut StoreState, default_mime_type: &str) {
        for folder in self.folders {
            state.insert_folder(folder);
        }
        for seed in self.documents {
            let doc = state.insert_document(
                seed.document,
                DocumentStatus::Approved,
                default_mime_type,
                seed.uploaded_at,
            );
            if let Some(stored) = state.document_mut(doc.id) {
                stored.download_count = seed.download_count;
            }
        }
        state.recount_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_counts() {
        let mut state = StoreState::new();
        Seed::defaults().apply(&mut state, "application/pdf");

        assert_eq!(state.folders().count(), 6);
        assert_eq!(state.documents().count(), 8);
        assert!(state.documents().all(|d| d.is_approved()));
        assert!(state.documents().all(|d| d.download_count < 50));

        let counts: Vec<u64> = state.folders().map(|f| f.document_count).collect();
        assert_eq!(counts, vec![1, 2, 1, 2, 1, 1]);
    }

    #[test]
    fn test_default_seed_tree_shape() {
        let mut state = StoreState::new();
        Seed::defaults().apply(&mut state, "application/pdf");

        assert_eq!(state.folder(1).unwrap().parent_id, None);
        assert_eq!(state.folder(2).unwrap().parent_id, Some(1));
        assert_eq!(state.folder(3).unwrap().parent_id, Some(1));
        assert_eq!(
            state.folder(4).unwrap().external_ref.as_deref(),
            Some("technology")
        );
    }

    #[test]
    fn test_seed_documents_point_at_drive() {
        let mut state = StoreState::new();
        Seed::defaults().apply(&mut state, "application/pdf");

        let doc = state.document_by_external_ref("1vE2upms8").unwrap();
        assert_eq!(doc.title, "Đại Số Tuyến Tính");
        assert_eq!(
            doc.download_url.as_deref(),
            Some("https://drive.google.com/file/d/1vE2upms8/view")
        );
        assert_eq!(doc.uploader_name.as_deref(), Some("Admin"));
        assert_eq!(doc.mime_type, "application/pdf");
    }
}
