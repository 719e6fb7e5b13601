//! Storefront GraphQL documents.
//!
//! Top-level list queries alias their connection to `data`. Nested
//! connections carry `pageInfo` and cursors so an overflowing first page
//! can be completed with the matching follow-up query keyed by the parent
//! id.

use crate::pagination::PageQuery;

/// Page size for connections embedded in a parent node and their follow-ups.
pub const NESTED_PAGE_SIZE: u32 = 250;

pub const PRODUCT_TYPES: PageQuery = PageQuery {
    name: "ProductTypes",
    document: r"
query ProductTypes($first: Int!, $after: String) {
  data: productTypes(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges { cursor node }
  }
}",
    connection_path: &["data"],
};

pub const PRODUCT_TAGS: PageQuery = PageQuery {
    name: "ProductTags",
    document: r"
query ProductTags($first: Int!, $after: String) {
  data: productTags(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges { cursor node }
  }
}",
    connection_path: &["data"],
};

pub const COLLECTIONS: PageQuery = PageQuery {
    name: "Collections",
    document: r"
query Collections($first: Int!, $after: String) {
  data: collections(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges {
      cursor
      node {
        description
        descriptionHtml
        handle
        id
        image { altText id originalSrc width height }
        products(sortKey: COLLECTION_DEFAULT, first: 250) {
          pageInfo { hasNextPage }
          edges { cursor node { id } }
        }
        title
        updatedAt
      }
    }
  }
}",
    connection_path: &["data"],
};

pub const PRODUCTS: PageQuery = PageQuery {
    name: "Products",
    document: r"
fragment PriceFields on MoneyV2 { amount currencyCode }

query Products($first: Int!, $after: String) {
  data: products(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges {
      cursor
      node {
        availableForSale
        collections(first: 250) {
          pageInfo { hasNextPage }
          edges { cursor node { id } }
        }
        compareAtPriceRange {
          minVariantPrice { ...PriceFields }
          maxVariantPrice { ...PriceFields }
        }
        createdAt
        description
        descriptionHtml
        handle
        id
        images(first: 250) {
          pageInfo { hasNextPage }
          edges { cursor node { altText id originalSrc width height } }
        }
        metafields(first: 250) {
          pageInfo { hasNextPage }
          edges { cursor node { key value } }
        }
        onlineStoreUrl
        options { id name values }
        priceRange {
          minVariantPrice { ...PriceFields }
          maxVariantPrice { ...PriceFields }
        }
        productType
        publishedAt
        tags
        title
        updatedAt
        variants(first: 250) {
          pageInfo { hasNextPage }
          edges { cursor node { ...VariantFields } }
        }
        vendor
      }
    }
  }
}

fragment VariantFields on ProductVariant {
  availableForSale
  compareAtPrice: compareAtPriceV2 { ...PriceFields }
  id
  image { altText id originalSrc width height }
  metafields(first: 250) {
    pageInfo { hasNextPage }
    edges { cursor node { key value } }
  }
  price: priceV2 { ...PriceFields }
  requiresShipping
  selectedOptions { name value }
  sku
  title
  unitPrice { ...PriceFields }
  weight
  weightUnit
}",
    connection_path: &["data"],
};

pub const BLOGS: PageQuery = PageQuery {
    name: "Blogs",
    document: r"
query Blogs($first: Int!, $after: String) {
  data: blogs(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges {
      cursor
      node {
        authors { email name }
        handle
        id
        title
        url
      }
    }
  }
}",
    connection_path: &["data"],
};

pub const ARTICLES: PageQuery = PageQuery {
    name: "Articles",
    document: r"
query Articles($first: Int!, $after: String) {
  data: articles(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges {
      cursor
      node {
        author: authorV2 { bio email firstName lastName name }
        blog { id }
        comments(first: 250) {
          pageInfo { hasNextPage }
          edges { cursor node { author { email name } content contentHtml id } }
        }
        content
        contentHtml
        excerpt
        excerptHtml
        handle
        id
        image { altText id originalSrc width height }
        publishedAt
        seo { description title }
        tags
        title
        url
      }
    }
  }
}",
    connection_path: &["data"],
};

pub const PAGES: PageQuery = PageQuery {
    name: "Pages",
    document: r"
query Pages($first: Int!, $after: String) {
  data: pages(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges {
      cursor
      node {
        body
        bodySummary
        createdAt
        handle
        id
        title
        updatedAt
      }
    }
  }
}",
    connection_path: &["data"],
};

pub const COLLECTION_PRODUCTS: PageQuery = PageQuery {
    name: "CollectionProducts",
    document: r"
query CollectionProducts($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on Collection {
      data: products(sortKey: COLLECTION_DEFAULT, first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges { cursor node { id } }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};

pub const PRODUCT_COLLECTIONS: PageQuery = PageQuery {
    name: "ProductCollections",
    document: r"
query ProductCollections($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on Product {
      data: collections(first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges { cursor node { id } }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};

pub const PRODUCT_IMAGES: PageQuery = PageQuery {
    name: "ProductImages",
    document: r"
query ProductImages($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on Product {
      data: images(first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges { cursor node { altText id originalSrc width height } }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};

pub const PRODUCT_VARIANTS: PageQuery = PageQuery {
    name: "ProductVariants",
    document: r"
fragment PriceFields on MoneyV2 { amount currencyCode }

query ProductVariants($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on Product {
      data: variants(first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges {
          cursor
          node {
            availableForSale
            compareAtPrice: compareAtPriceV2 { ...PriceFields }
            id
            image { altText id originalSrc width height }
            metafields(first: 250) {
              pageInfo { hasNextPage }
              edges { cursor node { key value } }
            }
            price: priceV2 { ...PriceFields }
            requiresShipping
            selectedOptions { name value }
            sku
            title
            unitPrice { ...PriceFields }
            weight
            weightUnit
          }
        }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};

pub const PRODUCT_METAFIELDS: PageQuery = PageQuery {
    name: "ProductMetafields",
    document: r"
query ProductMetafields($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on Product {
      data: metafields(first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges { cursor node { key value } }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};

pub const VARIANT_METAFIELDS: PageQuery = PageQuery {
    name: "VariantMetafields",
    document: r"
query VariantMetafields($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on ProductVariant {
      data: metafields(first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges { cursor node { key value } }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};

pub const ARTICLE_COMMENTS: PageQuery = PageQuery {
    name: "ArticleComments",
    document: r"
query ArticleComments($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on Article {
      data: comments(first: $first, after: $after) {
        pageInfo { hasNextPage }
        edges { cursor node { author { email name } content contentHtml id } }
      }
    }
  }
}",
    connection_path: &["node", "data"],
};
