/*!
# Fruzy Invoice

A small web form for building an itemized produce invoice in the browser and
downloading it as an Excel workbook.

## Overview

The shopkeeper uploads a rate list, picks items from a fixed bilingual
catalog (Urdu and English names, with a size), and builds a cart in the page.
The cart never lives on the server: it is posted as JSON once, rendered into
an XLSX file and streamed back.

## Architecture

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript
- **Key Components**:
  - Rate list upload form
  - Item picker fed by the embedded catalog
  - Cart table with running total

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Catalog - Fixed list of produce items
  - Rate Table - Latest uploaded prices, swapped wholesale on each upload
  - Display-String Codec - `اردو (English) (Size)` labels to parts and back
  - Rate Matcher - Exact, then substring, name lookup
  - Invoice Renderer - Styled XLSX output

## Modules

- **catalog**: The produce catalog and Urdu lookup
- **display**: Display-string decoding and encoding
- **rates**: Rate table, matcher and the shared store
- **loader**: Rate list import from uploaded spreadsheets
- **invoice**: Cart line items, request validation, item labels
- **downloader**: XLSX rendering of a validated invoice
- **error**: Error types and their HTTP responses
- **config**: Command line configuration
- **app**: Routing and handlers

## REST API Endpoints

- `/` - The invoice page with catalog and rates embedded
- `/upload_rate` - Replace the rate table from an uploaded spreadsheet
- `/generate` - Render a cart into `Fruzy_Invoice.xlsx`
- `/api/catalog`, `/api/rates`, `/api/rate` - Catalog, rates and price suggestions
- `/health` - Liveness check
*/

pub mod app;
pub mod catalog;
pub mod config;
pub mod display;
pub mod downloader;
pub mod error;
pub mod invoice;
pub mod loader;
pub mod rates;

/// Re-export the types most callers need
pub use catalog::{CATALOG, CatalogEntry};
pub use config::Config;
pub use display::{DecodedItem, Size, decode, encode};
pub use error::AppError;
pub use invoice::{Invoice, InvoiceRequest, LineItem, Unit};
pub use rates::{RateStore, RateTable};
